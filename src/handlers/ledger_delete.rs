//! Handler: ledger.delete
//!
//! Administrative removal of one entry, e.g. cancelling a depot request.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{ledger_kind, Ledger};
use crate::ledger::NaturalKey;
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "ledger.delete";

#[derive(Deserialize)]
pub struct Input {
    pub ledger: String,
    pub key: NaturalKey,
}

pub fn guard(ctx: &Context<Ledger>) -> bool {
    ctx.has_fields(&["ledger", "key"])
}

pub fn handle(ctx: &Context<Ledger>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let kind = ledger_kind(&input.ledger)?;
    let deleted = ctx.repo().delete(kind, input.key)?;
    Ok(json!({ "deleted": deleted }))
}
