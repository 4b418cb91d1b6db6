//! Handler: product.register
//!
//! Input is the product itself. A name that is already registered answers 409.

use serde_json::Value;

use super::{to_json, Ledger};
use crate::ledger::NewProduct;
use crate::microsvc::{Context, HandlerError};

pub const COMMAND: &str = "product.register";

pub fn guard(ctx: &Context<Ledger>) -> bool {
    ctx.has_field("name")
}

pub fn handle(ctx: &Context<Ledger>) -> Result<Value, HandlerError> {
    let product = ctx.input::<NewProduct>()?;
    to_json(&ctx.repo().register_product(product)?)
}
