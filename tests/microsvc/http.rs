//! HTTP transport tests: an axum server on an ephemeral port, driven by reqwest.

use std::sync::Arc;

use ledger_service::handlers::Ledger;
use ledger_service::microsvc::{self, Service};
use serde_json::{json, Value};

use crate::support::{entry, ledger_service};

/// Bind to port 0 and return the base URL.
async fn start_server(service: Arc<Service<Ledger>>) -> String {
    let app = microsvc::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_lists_commands() {
    let base = start_server(Arc::new(ledger_service())).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    assert!(commands.iter().any(|c| c == "ledger.submit"));
    assert!(commands.iter().any(|c| c == "product.register"));
}

#[tokio::test]
async fn submit_twice_then_list() {
    let base = start_server(Arc::new(ledger_service())).await;
    let client = reqwest::Client::new();

    for total in [10, 5] {
        let resp = client
            .post(format!("{base}/ledger.submit"))
            .json(&json!({ "ledger": "depot-stock-in", "entry": entry("X", "B1", total) }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
    }

    let resp = client
        .post(format!("{base}/ledger.list"))
        .json(&json!({ "ledger": "depot-stock-in" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["entries"][0]["totalQuantity"], 15);
}

#[tokio::test]
async fn concurrent_requests_accumulate() {
    let base = start_server(Arc::new(ledger_service())).await;
    let client = reqwest::Client::new();

    let requests = (0..20).map(|_| {
        let client = client.clone();
        let url = format!("{base}/ledger.submit");
        tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({ "ledger": "warehouse-stock-out", "entry": entry("X", "B1", 1) }))
                .send()
                .await
                .unwrap()
                .status()
        })
    });
    for request in requests.collect::<Vec<_>>() {
        assert_eq!(request.await.unwrap(), 200);
    }

    let body: Value = client
        .post(format!("{base}/ledger.list"))
        .json(&json!({ "ledger": "warehouse-stock-out" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["totalQuantity"], 20);
}

#[tokio::test]
async fn errors_carry_status_codes() {
    let base = start_server(Arc::new(ledger_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/nonexistent"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .post(format!("{base}/product.register"))
        .json(&json!({ "productCode": "NP500" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}
