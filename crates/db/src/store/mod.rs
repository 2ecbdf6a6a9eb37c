//! The product store: the only seam between handlers and persistence.
//!
//! Writes are optimistic. A store never locks rows ahead of time; it applies
//! a batch of [`Change`]s and reports a [`SaveOutcome::Conflict`] when a row
//! it was asked to modify or remove is no longer there. Callers decide how
//! to reconcile.

use async_trait::async_trait;
use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;

use crate::models::product::Product;

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

/// Failures a store can report besides a concurrency conflict.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing database failed or could not be reached.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An insert collided with an existing primary key.
    #[error("Product with id {id} already exists")]
    DuplicateKey { id: DbId },
}

/// A staged write, flushed by [`ProductStore::commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added(Product),
    Modified(Product),
    Removed(Product),
}

impl Change {
    /// Id of the product this change targets.
    pub fn id(&self) -> DbId {
        match self {
            Change::Added(p) | Change::Modified(p) | Change::Removed(p) => p.id,
        }
    }
}

/// Result of flushing a batch of changes.
///
/// A batch is all-or-nothing: on anything other than `Saved`, none of its
/// changes are visible.
#[derive(Debug)]
#[must_use]
pub enum SaveOutcome {
    /// Every change was applied.
    Saved,
    /// A modify or remove targeted a row that no longer exists.
    Conflict { id: DbId },
    /// The store itself failed.
    Failed(StoreError),
}

/// Collection-like access to persisted products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products in ascending id order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// One page of products in ascending id order.
    async fn list_page(&self, page: PageRequest) -> Result<Vec<Product>, StoreError>;

    /// The product with the given id, if any.
    async fn get(&self, id: DbId) -> Result<Option<Product>, StoreError>;

    /// Whether a product with the given id exists.
    async fn exists(&self, id: DbId) -> Result<bool, StoreError>;

    /// Confirm the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Apply a batch of changes atomically.
    async fn commit(&self, changes: Vec<Change>) -> SaveOutcome;
}
