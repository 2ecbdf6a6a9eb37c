//! Repository for the `products` table.
//!
//! Reads take the pool. Writes take any [`PgExecutor`] so
//! [`PgProductStore`](crate::store::postgres::PgProductStore) can run them
//! inside one transaction.

use catalog_core::pagination::PageRequest;
use catalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::product::Product;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, active";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// List all products ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// List one page of products ordered by id.
    pub async fn list_page(pool: &PgPool, page: &PageRequest) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Product>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Find a product by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a row with the given id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Insert a product with a caller-chosen id.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        product: &Product,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO products (id, name, description, active) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.active)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Replace every mutable column of a product.
    ///
    /// Returns `false` if no row with the product's id exists.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        product: &Product,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, description = $3, active = $4 \
             WHERE id = $1",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.active)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a product by id.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: DbId, name: &str) -> Product {
        Product {
            id,
            name: Some(name.into()),
            description: Some("Teste".into()),
            active: true,
        }
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    #[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
    async fn insert_then_find_round_trips(pool: PgPool) {
        ProductRepo::insert(&pool, &product(1, "Item1")).await.unwrap();

        let found = ProductRepo::find_by_id(&pool, 1).await.unwrap();
        assert_eq!(found, Some(product(1, "Item1")));
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    #[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
    async fn update_missing_row_reports_false(pool: PgPool) {
        let updated = ProductRepo::update(&pool, &product(42, "ghost")).await.unwrap();
        assert!(!updated);
    }

    #[sqlx::test(migrations = "../../db/migrations")]
    #[ignore = "requires a PostgreSQL instance at DATABASE_URL"]
    async fn list_page_orders_by_id(pool: PgPool) {
        for id in [3, 1, 2] {
            ProductRepo::insert(&pool, &product(id, "p")).await.unwrap();
        }

        let page = PageRequest::from_raw(Some("2"), Some("2"));
        let rows = ProductRepo::list_page(&pool, &page).await.unwrap();
        assert_eq!(rows.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
        assert!(ProductRepo::delete(&pool, 3).await.unwrap());
        assert!(!ProductRepo::exists(&pool, 3).await.unwrap());
    }
}
