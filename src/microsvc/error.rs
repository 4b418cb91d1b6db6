//! Error type for command handlers.

use thiserror::Error;

use crate::ledger::LedgerError;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// The input did not deserialize into the handler's input type.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// The handler's guard refused the input.
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// The handler's output could not be serialized.
    #[error("encode failed: {0}")]
    EncodeFailed(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::EncodeFailed(_) => 500,
            HandlerError::Ledger(err) => match err {
                LedgerError::MissingField(_) | LedgerError::Validation(_) => 400,
                LedgerError::Conflict(_) => 409,
                LedgerError::NotFound(_) => 404,
                LedgerError::Storage(_) | LedgerError::Lock(_) => 500,
            },
        }
    }
}
