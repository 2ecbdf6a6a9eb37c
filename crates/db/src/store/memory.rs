//! In-process [`ProductStore`] used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;
use tokio::sync::RwLock;

use crate::models::product::Product;
use crate::store::{Change, ProductStore, SaveOutcome, StoreError};

/// Product store kept in a `BTreeMap` so iteration is already in id order.
#[derive(Default)]
pub struct MemoryProductStore {
    rows: RwLock<BTreeMap<DbId, Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing rows. Later duplicates win.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let rows = products.into_iter().map(|p| (p.id, p)).collect();
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<Product>, StoreError> {
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(0);
        Ok(self
            .rows
            .read()
            .await
            .values()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<Product>, StoreError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.rows.read().await.contains_key(&id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn commit(&self, changes: Vec<Change>) -> SaveOutcome {
        let mut rows = self.rows.write().await;
        // Work on a copy so a failed batch leaves the store untouched.
        let mut staged = rows.clone();

        for change in changes {
            match change {
                Change::Added(product) => {
                    if staged.contains_key(&product.id) {
                        return SaveOutcome::Failed(StoreError::DuplicateKey { id: product.id });
                    }
                    staged.insert(product.id, product);
                }
                Change::Modified(product) => match staged.get_mut(&product.id) {
                    Some(row) => *row = product,
                    None => {
                        tracing::warn!(product_id = product.id, "Concurrency conflict on update");
                        return SaveOutcome::Conflict { id: product.id };
                    }
                },
                Change::Removed(product) => {
                    if staged.remove(&product.id).is_none() {
                        tracing::warn!(product_id = product.id, "Concurrency conflict on delete");
                        return SaveOutcome::Conflict { id: product.id };
                    }
                }
            }
        }

        *rows = staged;
        SaveOutcome::Saved
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn product(id: DbId, name: &str) -> Product {
        Product {
            id,
            name: Some(name.into()),
            description: Some("Teste".into()),
            active: true,
        }
    }

    fn ids(products: &[Product]) -> Vec<DbId> {
        products.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = MemoryProductStore::with_products([product(3, "c"), product(1, "a"), product(2, "b")]);
        assert_eq!(ids(&store.list().await.unwrap()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn list_page_slices_in_id_order() {
        let store = MemoryProductStore::with_products((1..=5).map(|id| product(id, "p")));

        let second = PageRequest::from_raw(Some("2"), Some("2"));
        assert_eq!(ids(&store.list_page(second).await.unwrap()), vec![3, 4]);

        let past_end = PageRequest::from_raw(Some("9"), Some("2"));
        assert!(store.list_page(past_end).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn commit_applies_add_modify_remove() {
        let store = MemoryProductStore::with_products([product(1, "a"), product(2, "b")]);

        let outcome = store
            .commit(vec![
                Change::Added(product(3, "c")),
                Change::Modified(product(1, "a2")),
                Change::Removed(product(2, "b")),
            ])
            .await;

        assert_matches!(outcome, SaveOutcome::Saved);
        assert_eq!(ids(&store.list().await.unwrap()), vec![1, 3]);
        assert_eq!(store.get(1).await.unwrap().unwrap().name.as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn modify_of_missing_row_is_a_conflict() {
        let store = MemoryProductStore::new();
        let outcome = store.commit(vec![Change::Modified(product(9, "x"))]).await;
        assert_matches!(outcome, SaveOutcome::Conflict { id: 9 });
    }

    #[tokio::test]
    async fn remove_of_missing_row_is_a_conflict() {
        let store = MemoryProductStore::new();
        let outcome = store.commit(vec![Change::Removed(product(4, "x"))]).await;
        assert_matches!(outcome, SaveOutcome::Conflict { id: 4 });
    }

    #[tokio::test]
    async fn duplicate_add_fails_without_partial_writes() {
        let store = MemoryProductStore::with_products([product(1, "a")]);

        let outcome = store
            .commit(vec![Change::Added(product(2, "b")), Change::Added(product(1, "dup"))])
            .await;

        assert_matches!(outcome, SaveOutcome::Failed(StoreError::DuplicateKey { id: 1 }));
        assert!(!store.exists(2).await.unwrap());
        assert_eq!(store.get(1).await.unwrap().unwrap().name.as_deref(), Some("a"));
    }
}
