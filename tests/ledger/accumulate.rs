use chrono::Duration;
use ledger_service::{LedgerError, LedgerKind, Quantities, Submission};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::support::{date, ledger, ledger_on};

#[test]
fn second_submission_accumulates_into_the_first() {
    let ledger = ledger();

    let first = ledger
        .submit(
            LedgerKind::WarehouseStockIn,
            Submission::lot("X", "B1", date("2025-01-01"), 10),
        )
        .unwrap();
    assert!(first.created);
    assert_eq!(first.quantities.total_quantity, 10);

    let second = ledger
        .submit(
            LedgerKind::WarehouseStockIn,
            Submission::lot("X", "B1", date("2025-01-01"), 5),
        )
        .unwrap();
    assert!(!second.created);
    assert_eq!(second.quantities.total_quantity, 15);

    let entries = ledger.list(LedgerKind::WarehouseStockIn, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].submissions, 2);
}

#[test]
fn same_delta_twice_doubles_without_duplicating() {
    let ledger = ledger();
    for _ in 0..2 {
        ledger
            .submit(
                LedgerKind::PurchaseOrder,
                Submission::lot("X", "B1", date("2025-01-01"), 5),
            )
            .unwrap();
    }
    let entries = ledger.list(LedgerKind::PurchaseOrder, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].quantities.total_quantity, 10);
}

#[test]
fn every_key_field_separates_entries() {
    let ledger = ledger();
    let base = || Submission::lot("X", "B1", date("2025-01-01"), 1).on(date("2024-05-01"));

    let variants = vec![
        base(),
        Submission {
            product_name: Some("Y".into()),
            ..base()
        },
        Submission {
            batch: Some("B2".into()),
            ..base()
        },
        Submission {
            expire: Some(date("2026-01-01")),
            ..base()
        },
        base().with_net_weight("100ml"),
        base().on(date("2024-05-02")),
    ];
    for submission in variants {
        assert!(ledger.submit(LedgerKind::DepotStockIn, submission).unwrap().created);
    }
    assert_eq!(ledger.list(LedgerKind::DepotStockIn, None).unwrap().len(), 6);
}

#[test]
fn ledgers_do_not_share_entries() {
    let ledger = ledger();
    let submission = || Submission::lot("X", "B1", date("2025-01-01"), 3);
    assert!(ledger.submit(LedgerKind::WarehouseStockIn, submission()).unwrap().created);
    assert!(ledger.submit(LedgerKind::WarehouseStockOut, submission()).unwrap().created);
}

#[test]
fn default_date_follows_the_clock() {
    let (ledger, clock) = ledger_on("2024-05-01");
    let submit = || {
        ledger
            .submit(
                LedgerKind::WarehouseStockIn,
                Submission::lot("X", "B1", date("2025-01-01"), 1),
            )
            .unwrap()
    };

    assert!(submit().created);
    assert!(!submit().created);

    clock.advance(Duration::days(1));
    let next_day = submit();
    assert!(next_day.created);
    assert_eq!(next_day.key.logical_date, Some(date("2024-05-02")));
}

#[test]
fn expiry_log_accumulates_across_days() {
    let (ledger, clock) = ledger_on("2024-05-01");
    ledger
        .submit(
            LedgerKind::Expired,
            Submission::lot("X", "B1", date("2024-04-30"), 4),
        )
        .unwrap();
    clock.advance(Duration::days(3));
    let later = ledger
        .submit(
            LedgerKind::Expired,
            Submission::lot("X", "B1", date("2024-04-30"), 2),
        )
        .unwrap();

    assert!(!later.created);
    assert_eq!(later.quantities.total_quantity, 6);
    let entries = ledger.list(LedgerKind::Expired, None).unwrap();
    assert_eq!(entries[0].logical_date, date("2024-05-01"));
}

#[test]
fn prices_are_overwritten_and_counters_default_to_zero() {
    let ledger = ledger();
    let mut first = Submission::lot("X", "B1", date("2025-01-01"), 10);
    first.quantities.box_quantity = 1;
    first.prices.trade_price = Some(Decimal::new(1000, 2));
    first.prices.actual_price = Some(Decimal::new(1200, 2));
    ledger.submit(LedgerKind::WarehouseStockIn, first).unwrap();

    let mut second = Submission::lot("X", "B1", date("2025-01-01"), 10);
    second.prices.trade_price = Some(Decimal::new(1100, 2));
    let outcome = ledger.submit(LedgerKind::WarehouseStockIn, second).unwrap();

    assert_eq!(
        outcome.quantities,
        Quantities {
            box_quantity: 1,
            unit_quantity: 0,
            total_quantity: 20,
        }
    );
    let entry = &ledger.list(LedgerKind::WarehouseStockIn, None).unwrap()[0];
    assert_eq!(entry.prices.trade_price, Some(Decimal::new(1100, 2)));
    assert_eq!(entry.prices.actual_price, Some(Decimal::new(1200, 2)));
}

#[test]
fn draining_to_zero_removes_the_entry() {
    let ledger = ledger();
    ledger
        .submit(
            LedgerKind::DepotStockOut,
            Submission::lot("X", "B1", date("2025-01-01"), 8),
        )
        .unwrap();
    let outcome = ledger
        .submit(
            LedgerKind::DepotStockOut,
            Submission::lot("X", "B1", date("2025-01-01"), -8),
        )
        .unwrap();

    assert!(outcome.removed);
    assert_eq!(outcome.version, None);
    assert!(ledger.list(LedgerKind::DepotStockOut, None).unwrap().is_empty());

    // the key starts over afterwards
    let again = ledger
        .submit(
            LedgerKind::DepotStockOut,
            Submission::lot("X", "B1", date("2025-01-01"), 2),
        )
        .unwrap();
    assert!(again.created);
}

#[test]
fn missing_key_field_is_rejected() {
    let ledger = ledger();
    let mut submission = Submission::lot("X", "", date("2025-01-01"), 1);
    let err = ledger
        .submit(LedgerKind::WarehouseStockIn, submission.clone())
        .unwrap_err();
    assert!(matches!(err, LedgerError::MissingField("batch")));

    submission.batch = Some("B1".into());
    submission.expire = None;
    let err = ledger
        .submit(LedgerKind::WarehouseStockIn, submission)
        .unwrap_err();
    assert!(matches!(err, LedgerError::MissingField("expire")));
    assert!(ledger.list(LedgerKind::WarehouseStockIn, None).unwrap().is_empty());
}

proptest! {
    #[test]
    fn total_is_the_sum_of_positive_deltas(deltas in proptest::collection::vec(1i64..1_000, 1..20)) {
        let ledger = ledger();
        let mut last = None;
        for delta in &deltas {
            last = Some(
                ledger
                    .submit(
                        LedgerKind::WarehouseStockIn,
                        Submission::lot("X", "B1", date("2025-01-01"), *delta),
                    )
                    .unwrap(),
            );
        }
        let last = last.unwrap();
        prop_assert_eq!(last.quantities.total_quantity, deltas.iter().sum::<i64>());
        prop_assert_eq!(ledger.list(LedgerKind::WarehouseStockIn, None).unwrap().len(), 1);
    }
}
