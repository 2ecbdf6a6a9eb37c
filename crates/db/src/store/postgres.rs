//! PostgreSQL-backed [`ProductStore`].

use async_trait::async_trait;
use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;

use crate::models::product::Product;
use crate::repositories::ProductRepo;
use crate::store::{Change, ProductStore, SaveOutcome, StoreError};
use crate::DbPool;

/// PostgreSQL error code for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Product store over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgProductStore {
    pool: DbPool,
}

impl PgProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run every change in one transaction.
    ///
    /// Returns `Ok(Some(id))` when a modify or remove matched no row; the
    /// transaction is rolled back in that case.
    async fn apply(&self, changes: &[Change]) -> Result<Option<DbId>, StoreError> {
        let mut tx = self.pool.begin().await?;

        for change in changes {
            let applied = match change {
                Change::Added(product) => {
                    ProductRepo::insert(&mut *tx, product)
                        .await
                        .map_err(|e| classify_insert_error(e, product.id))?;
                    true
                }
                Change::Modified(product) => ProductRepo::update(&mut *tx, product).await?,
                Change::Removed(product) => ProductRepo::delete(&mut *tx, product.id).await?,
            };

            if !applied {
                tx.rollback().await?;
                return Ok(Some(change.id()));
            }
        }

        tx.commit().await?;
        Ok(None)
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(ProductRepo::list(&self.pool).await?)
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<Product>, StoreError> {
        Ok(ProductRepo::list_page(&self.pool, &page).await?)
    }

    async fn get(&self, id: DbId) -> Result<Option<Product>, StoreError> {
        Ok(ProductRepo::find_by_id(&self.pool, id).await?)
    }

    async fn exists(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ProductRepo::exists(&self.pool, id).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn commit(&self, changes: Vec<Change>) -> SaveOutcome {
        if changes.is_empty() {
            return SaveOutcome::Saved;
        }

        match self.apply(&changes).await {
            Ok(None) => {
                tracing::debug!(changes = changes.len(), "Product changes committed");
                SaveOutcome::Saved
            }
            Ok(Some(id)) => {
                tracing::warn!(product_id = id, "Concurrency conflict, transaction rolled back");
                SaveOutcome::Conflict { id }
            }
            Err(err) => SaveOutcome::Failed(err),
        }
    }
}

/// Map a primary-key collision to [`StoreError::DuplicateKey`].
fn classify_insert_error(err: sqlx::Error, id: DbId) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::DuplicateKey { id };
        }
    }
    StoreError::Database(err)
}
