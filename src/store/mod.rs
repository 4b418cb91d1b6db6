//! Document storage consumed by the ledger.
//!
//! Documents live in named collections and are addressed by a string id. Every
//! write bumps a per-document version; every insert is stamped with a global
//! sequence number so collections can be listed in creation order.
//!
//! ```ignore
//! let store = InMemoryDocumentStore::new();
//! let saved = store.insert("wh-products", &product)?;
//! let again = store.get::<Product>("wh-products", &saved.data.name)?;
//! ```

mod in_memory;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

pub use in_memory::InMemoryDocumentStore;

/// A value that can be written to a collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Id of the document within its collection.
    fn id(&self) -> &str;
}

/// A document as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Stored<D> {
    pub data: D,
    /// Starts at 1, incremented by every update.
    pub version: u64,
    /// Global insertion order. Kept across updates.
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `insert` found a document with the same id.
    #[error("document {collection}:{id} already exists")]
    AlreadyExists { collection: String, id: String },
    /// `update` found a different version than the caller read.
    #[error("version conflict on {collection}:{id} (expected {expected}, found {actual})")]
    VersionConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// `update` targeted a document that does not exist.
    #[error("document {collection}:{id} not found")]
    NotFound { collection: String, id: String },
    #[error("document serialization failed: {0}")]
    Serde(String),
    #[error("storage failure: {0}")]
    Backend(String),
}

/// Collection-addressed document storage.
///
/// Each call is atomic on its own: a document is replaced as a whole or not at
/// all. Callers that need read-modify-write atomicity pair `get` with a
/// versioned `update` and hold a key lock across the two.
pub trait DocumentStore: Send + Sync {
    fn get<D: Document>(&self, collection: &str, id: &str) -> Result<Option<Stored<D>>, StoreError>;

    /// Insert a new document. Fails with `AlreadyExists` if the id is taken.
    fn insert<D: Document>(&self, collection: &str, doc: &D) -> Result<Stored<D>, StoreError>;

    /// Replace a document if its current version equals `expected_version`.
    fn update<D: Document>(
        &self,
        collection: &str,
        doc: &D,
        expected_version: u64,
    ) -> Result<Stored<D>, StoreError>;

    /// Delete by id. Returns whether a document was removed.
    fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// All documents in `collection` matching `predicate`, in insertion order.
    fn find<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<Stored<D>>, StoreError>;
}
