//! Handler: ledger.list

use serde::Deserialize;
use serde_json::{json, Value};

use super::{ledger_kind, Ledger};
use crate::ledger::LedgerFilter;
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "ledger.list";

#[derive(Deserialize)]
pub struct Input {
    pub ledger: String,
    #[serde(default)]
    pub filter: Option<LedgerFilter>,
}

pub fn guard(ctx: &Context<Ledger>) -> bool {
    ctx.has_field("ledger")
}

pub fn handle(ctx: &Context<Ledger>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let kind = ledger_kind(&input.ledger)?;
    let entries = ctx.repo().list(kind, input.filter.as_ref())?;
    Ok(json!({ "ledger": kind, "entries": entries }))
}
