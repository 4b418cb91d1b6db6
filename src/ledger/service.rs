use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::key::{optional, required};
use super::matcher::match_submission;
use super::resolver::{resolve, transition, Resolution};
use super::{
    Clock, EntryStatus, LedgerEntry, LedgerError, LedgerFilter, LedgerKind, NaturalKey,
    NewProduct, PersistenceGateway, Product, Submission, SubmitOutcome, SystemClock, PRODUCTS,
};
use crate::lock::{InMemoryLockManager, LockManager};
use crate::store::{DocumentStore, StoreError};

/// The ledger's public face: `submit` and `list` plus the administrative
/// operations around them.
///
/// Owned by the process and shared by reference (or `Arc`) with every request.
pub struct LedgerService<S, M = InMemoryLockManager> {
    gateway: PersistenceGateway<S, M>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore> LedgerService<S> {
    /// A ledger over `store` with process-local key locks and the wall clock.
    pub fn new(store: S) -> Self {
        Self::with_lock_manager(store, InMemoryLockManager::new())
    }
}

impl<S: DocumentStore, M: LockManager> LedgerService<S, M> {
    pub fn with_lock_manager(store: S, locks: M) -> Self {
        Self {
            gateway: PersistenceGateway::new(store, locks),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn gateway(&self) -> &PersistenceGateway<S, M> {
        &self.gateway
    }

    /// Fold one stock movement into the ledger of `kind`.
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn submit(&self, kind: LedgerKind, submission: Submission) -> Result<SubmitOutcome, LedgerError> {
        let now = self.clock.now();
        let matched = match_submission(kind, &submission, now)?;

        let applied = self
            .gateway
            .apply(kind, &matched.key, |existing| {
                resolve(kind, &matched, existing, &submission, now)
            })
            .map_err(|err| {
                warn!(
                    key = %matched.key,
                    error = %err,
                    retryable = err.is_retryable(),
                    "submission rejected"
                );
                err
            })?;

        let entry = applied.resolution.entry();
        let (created, removed) = match &applied.resolution {
            Resolution::Insert(_) => (true, false),
            Resolution::Remove(_) => (false, true),
            Resolution::Accumulate(_) | Resolution::Transition(_) => (false, false),
        };
        if created {
            info!(key = %matched.key, total = entry.quantities.total_quantity, "ledger entry created");
        }
        if removed {
            info!(key = %matched.key, "ledger entry reached zero and was removed");
        }

        Ok(SubmitOutcome {
            created,
            removed,
            key: matched.key.clone(),
            quantities: entry.quantities,
            status: entry.status,
            version: applied.version,
        })
    }

    /// Entries of `kind`, newest first.
    pub fn list(&self, kind: LedgerKind, filter: Option<&LedgerFilter>) -> Result<Vec<LedgerEntry>, LedgerError> {
        let default_filter = LedgerFilter::default();
        let filter = filter.unwrap_or(&default_filter);
        Ok(self
            .gateway
            .scan(kind, filter)?
            .into_iter()
            .map(|stored| stored.data)
            .collect())
    }

    pub fn get(&self, kind: LedgerKind, key: NaturalKey) -> Result<LedgerEntry, LedgerError> {
        let key = key.scoped(kind)?;
        self.gateway
            .load(kind, &key)?
            .map(|stored| stored.data)
            .ok_or_else(|| LedgerError::NotFound(format!("{} entry {}", kind, key)))
    }

    /// Administrative deletion, also used to cancel a pending request.
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn delete(&self, kind: LedgerKind, key: NaturalKey) -> Result<LedgerEntry, LedgerError> {
        let key = key.scoped(kind)?;
        let applied = self.gateway.apply(kind, &key, |existing| match existing {
            Some(entry) => Ok(Resolution::Remove(entry.clone())),
            None => Err(LedgerError::NotFound(format!("{} entry {}", kind, key))),
        })?;
        info!(key = %key, "ledger entry deleted");
        Ok(applied.resolution.entry().clone())
    }

    /// Move a status-bearing entry out of `pending`.
    #[instrument(skip_all, fields(kind = %kind, status = %status))]
    pub fn set_status(
        &self,
        kind: LedgerKind,
        key: NaturalKey,
        status: EntryStatus,
    ) -> Result<LedgerEntry, LedgerError> {
        if !kind.tracks_status() {
            return Err(LedgerError::Validation(format!(
                "{} entries do not carry a status",
                kind
            )));
        }
        let key = key.scoped(kind)?;
        let now = self.clock.now();
        let applied = self.gateway.apply(kind, &key, |existing| match existing {
            Some(entry) => Ok(Resolution::Transition(transition(entry, status, now)?)),
            None => Err(LedgerError::NotFound(format!("{} entry {}", kind, key))),
        })?;
        info!(key = %key, "ledger entry status changed");
        Ok(applied.resolution.entry().clone())
    }

    /// Register a warehouse product. Names are unique; a second registration
    /// of the same name is a conflict and changes nothing.
    #[instrument(skip_all)]
    pub fn register_product(&self, product: NewProduct) -> Result<Product, LedgerError> {
        let name = required("name", product.name)?;
        let product = Product {
            name,
            product_code: optional(product.product_code),
            net_weight: optional(product.net_weight),
            pack_size: product.pack_size,
            trade_price: product.trade_price,
            created_at: self.clock.now(),
        };

        match self.gateway.insert_document(PRODUCTS, &product) {
            Ok(stored) => {
                info!(product = %stored.data.name, "product registered");
                Ok(stored.data)
            }
            Err(StoreError::AlreadyExists { id, .. }) => {
                warn!(product = %id, "duplicate product registration");
                Err(LedgerError::Conflict(format!("product {} already exists", id)))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Registered products, newest first.
    pub fn list_products(&self) -> Result<Vec<Product>, LedgerError> {
        Ok(self
            .gateway
            .scan_documents::<Product>(PRODUCTS)?
            .into_iter()
            .map(|stored| stored.data)
            .collect())
    }
}
