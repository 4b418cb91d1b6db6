//! Command handlers for the ledger service, one file per command.

use serde::Serialize;
use serde_json::Value;

use crate::ledger::{LedgerKind, LedgerService};
use crate::microsvc::{HandlerError, Service};
use crate::store::InMemoryDocumentStore;

pub mod ledger_delete;
pub mod ledger_get;
pub mod ledger_list;
pub mod ledger_review;
pub mod ledger_submit;
pub mod product_list;
pub mod product_register;

/// The state every handler runs against.
pub type Ledger = LedgerService<InMemoryDocumentStore>;

/// A `Service` with every ledger command registered.
pub fn service(ledger: Ledger) -> Service<Ledger> {
    crate::register_handlers!(
        Service::new(ledger),
        ledger_submit,
        ledger_list,
        ledger_get,
        ledger_delete,
        ledger_review,
        product_register,
        product_list,
    )
}

fn ledger_kind(name: &str) -> Result<LedgerKind, HandlerError> {
    Ok(name.parse::<LedgerKind>()?)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, HandlerError> {
    serde_json::to_value(value).map_err(|e| HandlerError::EncodeFailed(e.to_string()))
}
