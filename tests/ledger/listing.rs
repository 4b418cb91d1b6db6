use chrono::Duration;
use ledger_service::{EntryStatus, LedgerFilter, LedgerKind, Submission};

use crate::support::{date, ledger, ledger_on};

fn batches(entries: &[ledger_service::LedgerEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.batch.as_str()).collect()
}

#[test]
fn empty_ledger_lists_nothing() {
    let ledger = ledger();
    for kind in LedgerKind::ALL {
        assert!(ledger.list(kind, None).unwrap().is_empty());
    }
}

#[test]
fn newest_entry_comes_first() {
    let ledger = ledger();
    for batch in ["B1", "B2", "B3"] {
        ledger
            .submit(
                LedgerKind::WarehouseStockIn,
                Submission::lot("X", batch, date("2025-01-01"), 1),
            )
            .unwrap();
    }
    // accumulating into B1 keeps its original position
    ledger
        .submit(
            LedgerKind::WarehouseStockIn,
            Submission::lot("X", "B1", date("2025-01-01"), 1),
        )
        .unwrap();

    let entries = ledger.list(LedgerKind::WarehouseStockIn, None).unwrap();
    assert_eq!(batches(&entries), vec!["B3", "B2", "B1"]);
}

#[test]
fn filter_narrows_by_product_batch_status_and_date() {
    let (ledger, clock) = ledger_on("2024-05-01");
    let kind = LedgerKind::DepotRequest;

    ledger
        .submit(kind, Submission::lot("X", "B1", date("2025-01-01"), 1))
        .unwrap();
    let approved = ledger
        .submit(kind, Submission::lot("Y", "B2", date("2025-01-01"), 1))
        .unwrap();
    ledger
        .set_status(kind, approved.key, EntryStatus::Approved)
        .unwrap();
    clock.advance(Duration::days(2));
    ledger
        .submit(kind, Submission::lot("X", "B3", date("2025-01-01"), 1))
        .unwrap();

    let by_product = LedgerFilter {
        product_name: Some("X".into()),
        ..LedgerFilter::default()
    };
    assert_eq!(batches(&ledger.list(kind, Some(&by_product)).unwrap()), vec!["B3", "B1"]);

    let by_batch = LedgerFilter {
        batch: Some("B2".into()),
        ..LedgerFilter::default()
    };
    assert_eq!(batches(&ledger.list(kind, Some(&by_batch)).unwrap()), vec!["B2"]);

    let pending = LedgerFilter {
        status: Some(EntryStatus::Pending),
        ..LedgerFilter::default()
    };
    assert_eq!(batches(&ledger.list(kind, Some(&pending)).unwrap()), vec!["B3", "B1"]);

    let later = LedgerFilter {
        from: Some(date("2024-05-02")),
        ..LedgerFilter::default()
    };
    assert_eq!(batches(&ledger.list(kind, Some(&later)).unwrap()), vec!["B3"]);

    let earlier = LedgerFilter {
        to: Some(date("2024-05-01")),
        ..LedgerFilter::default()
    };
    assert_eq!(batches(&ledger.list(kind, Some(&earlier)).unwrap()), vec!["B2", "B1"]);
}

#[test]
fn entries_serialize_with_wire_field_names() {
    let ledger = ledger();
    ledger
        .submit(
            LedgerKind::WarehouseStockIn,
            Submission::lot("X", "B1", date("2025-01-01"), 7).with_net_weight("500g"),
        )
        .unwrap();

    let entry = &ledger.list(LedgerKind::WarehouseStockIn, None).unwrap()[0];
    let json = serde_json::to_value(entry).unwrap();
    assert_eq!(json["productName"], "X");
    assert_eq!(json["batch"], "B1");
    assert_eq!(json["expire"], "2025-01-01");
    assert_eq!(json["netWeight"], "500g");
    assert_eq!(json["date"], "2024-05-01");
    assert_eq!(json["totalQuantity"], 7);
    assert_eq!(json["boxQuantity"], 0);
    assert!(json.get("status").is_none());
}
