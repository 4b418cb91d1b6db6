//! Persistence gateway: the only code that touches the document store.
//!
//! Every ledger write runs `lock key → read → resolve → versioned write →
//! unlock`. The lock linearises writers of one key; the expected-version check
//! on update turns any writer that slipped past the lock (another process on a
//! shared store) into a `VersionConflict` instead of a lost update.

use tracing::{debug, instrument};

use super::resolver::Resolution;
use super::{LedgerEntry, LedgerError, LedgerFilter, LedgerKind, NaturalKey};
use crate::lock::{InMemoryLockManager, LockManager};
use crate::store::{Document, DocumentStore, StoreError, Stored};

/// Result of [`PersistenceGateway::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub resolution: Resolution,
    /// Version after the write, `None` when the entry was deleted.
    pub version: Option<u64>,
}

pub struct PersistenceGateway<S, M = InMemoryLockManager> {
    store: S,
    locks: M,
}

impl<S: DocumentStore, M: LockManager> PersistenceGateway<S, M> {
    pub fn new(store: S, locks: M) -> Self {
        Self { store, locks }
    }

    pub fn locks(&self) -> &M {
        &self.locks
    }

    fn lock_key(kind: LedgerKind, id: &str) -> String {
        format!("{}:{}", kind.collection(), id)
    }

    /// Resolve and write one mutation of `key` as a single serialised unit.
    ///
    /// `decide` sees the current entry (if any) while the key lock is held and
    /// returns the write to perform. An error from `decide` aborts with nothing
    /// written.
    #[instrument(level = "debug", skip_all, fields(kind = %kind, key = %key))]
    pub fn apply<F>(&self, kind: LedgerKind, key: &NaturalKey, decide: F) -> Result<Applied, LedgerError>
    where
        F: FnOnce(Option<&LedgerEntry>) -> Result<Resolution, LedgerError>,
    {
        let collection = kind.collection();
        let id = key.document_id();
        let _guard = self.locks.acquire(&Self::lock_key(kind, &id))?;

        let existing = self.store.get::<LedgerEntry>(collection, &id)?;
        let resolution = decide(existing.as_ref().map(|stored| &stored.data))?;

        let version = match (&resolution, &existing) {
            (Resolution::Insert(entry), None) => Some(self.store.insert(collection, entry)?.version),
            (Resolution::Accumulate(entry), Some(current))
            | (Resolution::Transition(entry), Some(current)) => {
                Some(self.store.update(collection, entry, current.version)?.version)
            }
            (Resolution::Remove(_), Some(_)) => {
                self.store.delete(collection, &id)?;
                None
            }
            (resolution, _) => {
                return Err(LedgerError::Conflict(format!(
                    "{} does not apply to the stored state of {}",
                    resolution.label(),
                    id
                )))
            }
        };

        debug!(resolution = resolution.label(), ?version, "ledger write applied");
        Ok(Applied { resolution, version })
    }

    /// Point read without locking.
    pub fn load(&self, kind: LedgerKind, key: &NaturalKey) -> Result<Option<Stored<LedgerEntry>>, LedgerError> {
        Ok(self.store.get(kind.collection(), &key.document_id())?)
    }

    /// Entries of `kind` matching `filter`, newest first.
    pub fn scan(&self, kind: LedgerKind, filter: &LedgerFilter) -> Result<Vec<Stored<LedgerEntry>>, LedgerError> {
        let mut entries = self
            .store
            .find::<LedgerEntry>(kind.collection(), &|entry| filter.matches(entry))?;
        entries.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        Ok(entries)
    }

    /// Insert a document that must not already exist.
    pub fn insert_document<D: Document>(&self, collection: &str, doc: &D) -> Result<Stored<D>, StoreError> {
        self.store.insert(collection, doc)
    }

    /// Every document in `collection`, newest first.
    pub fn scan_documents<D: Document>(&self, collection: &str) -> Result<Vec<Stored<D>>, StoreError> {
        let mut docs = self.store.find::<D>(collection, &|_| true)?;
        docs.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        Ok(docs)
    }
}
