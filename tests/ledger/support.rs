use std::sync::Arc;

use chrono::NaiveDate;
use ledger_service::{FixedClock, InMemoryDocumentStore, LedgerService};

pub type Ledger = LedgerService<InMemoryDocumentStore>;

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

/// A ledger whose clock is pinned to midnight UTC on `today`.
pub fn ledger_on(today: &str) -> (Ledger, Arc<FixedClock>) {
    let clock = Arc::new(FixedClock::at_date(date(today)));
    let ledger = LedgerService::new(InMemoryDocumentStore::new()).with_clock(clock.clone());
    (ledger, clock)
}

pub fn ledger() -> Ledger {
    ledger_on("2024-05-01").0
}
