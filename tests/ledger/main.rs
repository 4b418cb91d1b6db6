//! Integration tests for the inventory ledger.

mod support;

mod accumulate;
mod listing;
