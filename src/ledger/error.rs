use thiserror::Error;

use crate::lock::LockError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A required key field is absent or blank. Raised before any store access.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// The request is malformed for this ledger.
    #[error("invalid request: {0}")]
    Validation(String),
    /// The request contradicts stored state; nothing was written.
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// The store failed. Stored state is unchanged.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("lock error: {0}")]
    Lock(#[from] LockError),
}

impl LedgerError {
    /// Whether resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Storage(_) | LedgerError::Lock(_))
    }
}
