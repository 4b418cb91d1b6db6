use thiserror::Error;

/// Errors raised while taking or releasing a key lock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// A thread panicked while holding the lock table.
    #[error("lock table poisoned: {0}")]
    Poisoned(String),
}
