use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use super::{LockError, LockManager};

/// Table entry for a key that is held or awaited.
struct Slot {
    held: bool,
    /// Threads parked in `lock` for this key.
    waiters: usize,
    /// Paired with the table mutex; signalled when a waiter may take the key.
    released: Arc<Condvar>,
}

impl Slot {
    fn free() -> Self {
        Slot {
            held: false,
            waiters: 0,
            released: Arc::new(Condvar::new()),
        }
    }
}

type Table = HashMap<String, Slot>;

/// Process-local lock manager.
///
/// One mutex guards the whole table; each key has its own condvar so a release
/// only wakes threads waiting on that key. A key's slot is evicted as soon as
/// it is released with nobody waiting, so the table holds only live keys.
///
/// Clones share the same table, so every gateway built from a clone serialises
/// against the others.
#[derive(Clone, Default)]
pub struct InMemoryLockManager {
    table: Arc<Mutex<Table>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held or awaited.
    pub fn len(&self) -> usize {
        self.table.lock().map(|table| table.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> Result<MutexGuard<'_, Table>, LockError> {
        self.table
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))
    }
}

impl LockManager for InMemoryLockManager {
    fn lock(&self, key: &str) -> Result<(), LockError> {
        let mut table = self.table()?;
        loop {
            let slot = table.entry(key.to_string()).or_insert_with(Slot::free);
            if !slot.held {
                slot.held = true;
                return Ok(());
            }

            slot.waiters += 1;
            let released = slot.released.clone();
            table = released
                .wait(table)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
            // a slot with waiters is never evicted
            if let Some(slot) = table.get_mut(key) {
                slot.waiters -= 1;
            }
        }
    }

    fn try_lock(&self, key: &str) -> Result<bool, LockError> {
        let mut table = self.table()?;
        let slot = table.entry(key.to_string()).or_insert_with(Slot::free);
        if slot.held {
            return Ok(false);
        }
        slot.held = true;
        Ok(true)
    }

    fn unlock(&self, key: &str) -> Result<(), LockError> {
        let mut table = self.table()?;
        let evict = match table.get_mut(key) {
            Some(slot) if slot.held && slot.waiters > 0 => {
                slot.held = false;
                slot.released.notify_one();
                false
            }
            Some(slot) => slot.held,
            None => false,
        };
        if evict {
            table.remove(key);
        }
        Ok(())
    }
}
