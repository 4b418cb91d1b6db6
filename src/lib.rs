//! Inventory ledger service for pharmaceutical stock tracking.
//!
//! Warehouse and depot stock movements, damaged and expired goods, purchase
//! orders and returns are all recorded as ledger entries keyed by product lot
//! (and usually business date). Repeated submissions for the same key
//! accumulate into one entry; writes to one key are serialised so no
//! submission is lost.

pub mod config;
pub mod handlers;
pub mod ledger;
pub mod lock;
pub mod microsvc;
pub mod store;

pub use ledger::{
    Clock, EntryStatus, FixedClock, KeyScope, LedgerEntry, LedgerError, LedgerFilter, LedgerKind,
    LedgerService, NaturalKey, NewProduct, PersistenceGateway, Prices, Product, Quantities,
    Submission, SubmitOutcome, SystemClock,
};
pub use lock::{InMemoryLockManager, KeyGuard, LockError, LockManager};
pub use microsvc::{CommandRequest, CommandResponse, Context, HandlerError, Service};
pub use store::{Document, DocumentStore, InMemoryDocumentStore, StoreError, Stored};
