//! Product entity.

use catalog_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `products` table.
///
/// The same shape is used as the request body for create and update: the
/// client supplies the id, and every other field is replaced wholesale.
/// An omitted id binds to `0`, which the store accepts like any other key.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: DbId,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub active: bool,
}
