//! Handler: ledger.submit
//!
//! Input: `{ "ledger": "<kind>", "entry": { productName, batch, expire, ... } }`.
//! Output: the submit outcome.

use serde::Deserialize;
use serde_json::Value;

use super::{ledger_kind, to_json, Ledger};
use crate::ledger::Submission;
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "ledger.submit";

#[derive(Deserialize)]
pub struct Input {
    pub ledger: String,
    pub entry: Submission,
}

pub fn guard(ctx: &Context<Ledger>) -> bool {
    ctx.has_fields(&["ledger", "entry"])
}

pub fn handle(ctx: &Context<Ledger>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;
    let kind = ledger_kind(&input.ledger)?;
    let outcome = ctx.repo().submit(kind, input.entry)?;
    to_json(&outcome)
}
