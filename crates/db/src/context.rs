//! Per-request unit of work over a [`ProductStore`].

use std::sync::Arc;

use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;

use crate::models::product::Product;
use crate::store::{Change, ProductStore, SaveOutcome, StoreError};

/// Reads go straight to the store; writes are staged until [`save`].
///
/// A context is created per request and dropped with it. Dropping a context
/// with staged changes discards them.
///
/// [`save`]: ProductContext::save
pub struct ProductContext {
    store: Arc<dyn ProductStore>,
    pending: Vec<Change>,
}

impl ProductContext {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            store,
            pending: Vec::new(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.store.list().await
    }

    pub async fn list_page(&self, page: PageRequest) -> Result<Vec<Product>, StoreError> {
        self.store.list_page(page).await
    }

    pub async fn get(&self, id: DbId) -> Result<Option<Product>, StoreError> {
        self.store.get(id).await
    }

    pub async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
        self.store.exists(id).await
    }

    /// Stage an insert.
    pub fn add(&mut self, product: Product) {
        self.pending.push(Change::Added(product));
    }

    /// Stage a full replacement of an existing row.
    pub fn update(&mut self, product: Product) {
        self.pending.push(Change::Modified(product));
    }

    /// Stage a delete.
    pub fn remove(&mut self, product: Product) {
        self.pending.push(Change::Removed(product));
    }

    /// Flush every staged change in one batch.
    ///
    /// The staged set is cleared whatever the outcome.
    pub async fn save(&mut self) -> SaveOutcome {
        let changes = std::mem::take(&mut self.pending);
        if changes.is_empty() {
            return SaveOutcome::Saved;
        }
        self.store.commit(changes).await
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::store::MemoryProductStore;

    fn product(id: DbId, name: &str, active: bool) -> Product {
        Product {
            id,
            name: Some(name.into()),
            description: Some("Teste".into()),
            active,
        }
    }

    fn context() -> ProductContext {
        ProductContext::new(Arc::new(MemoryProductStore::new()))
    }

    #[tokio::test]
    async fn staged_changes_are_invisible_until_saved() {
        let mut ctx = context();
        ctx.add(product(1, "Item1", true));

        assert_eq!(ctx.get(1).await.unwrap(), None);

        assert_matches!(ctx.save().await, SaveOutcome::Saved);
        assert_eq!(ctx.get(1).await.unwrap(), Some(product(1, "Item1", true)));
    }

    #[tokio::test]
    async fn save_without_changes_is_a_no_op() {
        let mut ctx = context();
        assert_matches!(ctx.save().await, SaveOutcome::Saved);
    }

    #[tokio::test]
    async fn failed_save_clears_the_staged_set() {
        let mut ctx = context();
        ctx.update(product(5, "ghost", false));

        assert_matches!(ctx.save().await, SaveOutcome::Conflict { id: 5 });
        assert!(!ctx.exists(5).await.unwrap());

        // The rejected update is not replayed by the next save.
        ctx.add(product(6, "fresh", true));
        assert_matches!(ctx.save().await, SaveOutcome::Saved);
        assert!(ctx.exists(6).await.unwrap());
    }

    #[tokio::test]
    async fn contexts_over_one_store_see_each_others_writes() {
        let store: Arc<dyn ProductStore> = Arc::new(MemoryProductStore::new());

        let mut writer = ProductContext::new(Arc::clone(&store));
        writer.add(product(1, "Item1", true));
        assert_matches!(writer.save().await, SaveOutcome::Saved);

        let mut other = ProductContext::new(Arc::clone(&store));
        let found = other.get(1).await.unwrap().unwrap();
        other.remove(found);
        assert_matches!(other.save().await, SaveOutcome::Saved);

        writer.update(product(1, "Item1b", false));
        assert_matches!(writer.save().await, SaveOutcome::Conflict { id: 1 });
    }
}
