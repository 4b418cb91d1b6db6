use ledger_service::CommandRequest;
use serde_json::json;

use crate::support::{entry, ledger_service};

fn request(command: &str, input: serde_json::Value) -> CommandRequest {
    CommandRequest {
        command: command.into(),
        input,
    }
}

#[test]
fn missing_key_field_is_a_bad_request() {
    let service = ledger_service();
    let mut body = entry("X", "B1", 1);
    body.as_object_mut().unwrap().remove("batch");

    let response = service.dispatch_request(&request(
        "ledger.submit",
        json!({ "ledger": "damaged", "entry": body }),
    ));
    assert_eq!(response.status, 400);
    assert!(response.body["error"].as_str().unwrap().contains("batch"));
}

#[test]
fn unknown_ledger_is_a_bad_request() {
    let service = ledger_service();
    let response = service.dispatch_request(&request(
        "ledger.submit",
        json!({ "ledger": "not-a-ledger", "entry": entry("X", "B1", 1) }),
    ));
    assert_eq!(response.status, 400);
}

#[test]
fn guard_rejects_malformed_input() {
    let service = ledger_service();
    let response = service.dispatch_request(&request("ledger.submit", json!({ "entry": {} })));
    assert_eq!(response.status, 400);
}

#[test]
fn duplicate_product_is_a_conflict() {
    let service = ledger_service();
    let ok = service.dispatch_request(&request("product.register", json!({ "name": "Napa 500" })));
    assert_eq!(ok.status, 200);

    let dup = service.dispatch_request(&request("product.register", json!({ "name": "Napa 500" })));
    assert_eq!(dup.status, 409);
}

#[test]
fn closed_request_is_a_conflict() {
    let service = ledger_service();
    let submitted = service
        .dispatch(
            "ledger.submit",
            json!({ "ledger": "return", "entry": entry("X", "B1", 1) }),
        )
        .unwrap();
    service
        .dispatch(
            "ledger.review",
            json!({ "ledger": "return", "key": submitted["key"], "status": "rejected" }),
        )
        .unwrap();

    let response = service.dispatch_request(&request(
        "ledger.submit",
        json!({ "ledger": "return", "entry": entry("X", "B1", 1) }),
    ));
    assert_eq!(response.status, 409);
}

#[test]
fn missing_entry_and_unknown_command_are_not_found() {
    let service = ledger_service();
    let key = json!({
        "productName": "X",
        "batch": "B1",
        "expire": "2025-01-01",
        "date": "2024-05-01",
    });
    let response = service.dispatch_request(&request(
        "ledger.get",
        json!({ "ledger": "damaged", "key": key }),
    ));
    assert_eq!(response.status, 404);

    let response = service.dispatch_request(&request("ledger.nope", json!({})));
    assert_eq!(response.status, 404);
}
