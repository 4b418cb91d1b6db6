//! Handler: product.list

use serde_json::{json, Value};

use super::Ledger;
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "product.list";

pub fn guard(_ctx: &Context<Ledger>) -> bool {
    true
}

pub fn handle(ctx: &Context<Ledger>) -> Result<Value, HandlerError> {
    let products = ctx.repo().list_products()?;
    Ok(json!({ "products": products }))
}
