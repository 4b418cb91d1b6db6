//! Inventory ledger: every quantity-bearing stock mutation goes through here.
//!
//! A submission is matched to its natural key, resolved against the entry
//! stored under that key (insert, accumulate, transition or remove) and written
//! by the persistence gateway while the key is locked.
//!
//! ```ignore
//! let ledger = LedgerService::new(InMemoryDocumentStore::new());
//! let first = ledger.submit(LedgerKind::WarehouseStockIn, Submission::lot("X", "B1", expire, 10))?;
//! assert!(first.created);
//! let again = ledger.submit(LedgerKind::WarehouseStockIn, Submission::lot("X", "B1", expire, 5))?;
//! assert_eq!(again.quantities.total_quantity, 15);
//! ```

mod clock;
mod entry;
mod error;
mod gateway;
mod key;
mod kind;
pub mod matcher;
mod product;
pub mod resolver;
mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entry::{
    EntryStatus, LedgerEntry, LedgerFilter, Prices, Quantities, Submission, SubmitOutcome,
};
pub use error::LedgerError;
pub use gateway::{Applied, PersistenceGateway};
pub use key::NaturalKey;
pub use kind::{KeyScope, LedgerKind};
pub use product::{NewProduct, Product, PRODUCTS};
pub use resolver::Resolution;
pub use service::LedgerService;
