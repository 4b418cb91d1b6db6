//! Handler: ledger.review
//!
//! Approves or rejects a pending entry on a status-bearing ledger.

use serde::Deserialize;
use serde_json::Value;

use super::{ledger_kind, to_json, Ledger};
use crate::ledger::{EntryStatus, NaturalKey};
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "ledger.review";

#[derive(Deserialize)]
pub struct Input {
    pub ledger: String,
    pub key: NaturalKey,
    pub status: EntryStatus,
}

pub fn guard(ctx: &Context<Ledger>) -> bool {
    ctx.has_fields(&["ledger", "key", "status"])
}

pub fn handle(ctx: &Context<Ledger>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let kind = ledger_kind(&input.ledger)?;
    to_json(&ctx.repo().set_status(kind, input.key, input.status)?)
}
