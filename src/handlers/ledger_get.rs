//! Handler: ledger.get

use serde::Deserialize;
use serde_json::Value;

use super::{ledger_kind, to_json, Ledger};
use crate::ledger::NaturalKey;
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "ledger.get";

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
    to_json(&ctx.repo().get(kind, input.key)?)
}
