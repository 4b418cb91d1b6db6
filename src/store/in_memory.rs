//! HashMap-backed document store for tests and single-process deployments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Document, DocumentStore, StoreError, Stored};

struct Slot {
    bytes: Vec<u8>,
    version: u64,
    sequence: u64,
}

#[derive(Default)]
struct Tables {
    slots: HashMap<String, Slot>,
    next_sequence: u64,
}

/// In-memory document store.
///
/// Storage key is `"collection:id"`. Clone-friendly via `Arc`; clones see the
/// same documents.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn encode<D: Document>(doc: &D) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(doc).map_err(|e| StoreError::Serde(e.to_string()))
    }

    fn decode<D: Document>(bytes: &[u8]) -> Result<D, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serde(e.to_string()))
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("store lock poisoned".into())
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get<D: Document>(&self, collection: &str, id: &str) -> Result<Option<Stored<D>>, StoreError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        match tables.slots.get(&Self::slot_key(collection, id)) {
            Some(slot) => Ok(Some(Stored {
                data: Self::decode(&slot.bytes)?,
                version: slot.version,
                sequence: slot.sequence,
            })),
            None => Ok(None),
        }
    }

    fn insert<D: Document>(&self, collection: &str, doc: &D) -> Result<Stored<D>, StoreError> {
        let bytes = Self::encode(doc)?;
        let key = Self::slot_key(collection, doc.id());

        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        if tables.slots.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: doc.id().to_string(),
            });
        }

        tables.next_sequence += 1;
        let sequence = tables.next_sequence;
        tables.slots.insert(
            key,
            Slot {
                bytes,
                version: 1,
                sequence,
            },
        );

        Ok(Stored {
            data: doc.clone(),
            version: 1,
            sequence,
        })
    }

    fn update<D: Document>(
        &self,
        collection: &str,
        doc: &D,
        expected_version: u64,
    ) -> Result<Stored<D>, StoreError> {
        let bytes = Self::encode(doc)?;
        let key = Self::slot_key(collection, doc.id());

        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        let slot = tables
            .slots
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: doc.id().to_string(),
            })?;

        if slot.version != expected_version {
            return Err(StoreError::VersionConflict {
                collection: collection.to_string(),
                id: doc.id().to_string(),
                expected: expected_version,
                actual: slot.version,
            });
        }

        slot.bytes = bytes;
        slot.version += 1;

        Ok(Stored {
            data: doc.clone(),
            version: slot.version,
            sequence: slot.sequence,
        })
    }

    fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        Ok(tables.slots.remove(&Self::slot_key(collection, id)).is_some())
    }

    fn find<D: Document>(
        &self,
        collection: &str,
        predicate: &dyn Fn(&D) -> bool,
    ) -> Result<Vec<Stored<D>>, StoreError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        let prefix = format!("{}:", collection);

        let mut results = Vec::new();
        for (key, slot) in tables.slots.iter() {
            if !key.starts_with(&prefix) {
                continue;
            }
            let data: D = Self::decode(&slot.bytes)?;
            if predicate(&data) {
                results.push(Stored {
                    data,
                    version: slot.version,
                    sequence: slot.sequence,
                });
            }
        }
        results.sort_by_key(|stored| stored.sequence);

        Ok(results)
    }
}
