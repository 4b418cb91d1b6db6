//! Per-key mutual exclusion for ledger writes.
//!
//! Every natural key gets its own lock. The persistence gateway holds the lock
//! for the whole read → resolve → write cycle, so submissions for the same key
//! are applied one after another while submissions for different keys never
//! contend.
//!
//! ```ignore
//! let locks = InMemoryLockManager::new();
//! let _guard = locks.acquire("wh-stock-in:Napa/B1/2025-01-01/-/2024-05-01")?;
//! // read, resolve and write while the guard is alive
//! ```

mod error;
mod in_memory;

pub use error::LockError;
pub use in_memory::InMemoryLockManager;

/// Exclusive access to string keys.
///
/// A manager only tracks keys that are held or awaited; a key nobody holds
/// costs nothing. A shared deployment would back this with something like a
/// Postgres advisory lock or a Redis lease.
pub trait LockManager: Send + Sync {
    /// Block until `key` is held by the caller.
    fn lock(&self, key: &str) -> Result<(), LockError>;

    /// Take `key` without blocking. `Ok(false)` if someone else holds it.
    fn try_lock(&self, key: &str) -> Result<bool, LockError>;

    /// Release `key`. Releasing a key that is not held is a no-op.
    fn unlock(&self, key: &str) -> Result<(), LockError>;

    /// Block until `key` is held, returning a guard that releases it on drop.
    fn acquire(&self, key: &str) -> Result<KeyGuard<'_, Self>, LockError> {
        self.lock(key)?;
        Ok(KeyGuard {
            key: key.to_string(),
            manager: self,
        })
    }

    /// Like [`acquire`](Self::acquire) but returns `None` instead of waiting.
    fn try_acquire(&self, key: &str) -> Result<Option<KeyGuard<'_, Self>>, LockError> {
        if self.try_lock(key)? {
            Ok(Some(KeyGuard {
                key: key.to_string(),
                manager: self,
            }))
        } else {
            Ok(None)
        }
    }
}

/// Holds a key for as long as it is alive.
pub struct KeyGuard<'a, M: LockManager + ?Sized> {
    key: String,
    manager: &'a M,
}

impl<M: LockManager + ?Sized> KeyGuard<'_, M> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<M: LockManager + ?Sized> Drop for KeyGuard<'_, M> {
    fn drop(&mut self) {
        if let Err(err) = self.manager.unlock(&self.key) {
            tracing::error!(key = %self.key, error = %err, "failed to release key lock");
        }
    }
}

impl<M: LockManager + ?Sized> std::fmt::Debug for KeyGuard<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGuard").field("key", &self.key).finish()
    }
}
