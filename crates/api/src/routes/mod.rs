pub mod health;
pub mod product;

use axum::Router;

use crate::state::AppState;

/// Prefix under which every API route is nested.
pub const API_PREFIX: &str = "/api";

/// Absolute path of the products collection, used for `Location` headers.
pub const PRODUCTS_PATH: &str = "/api/products";

/// Build the `/api` route tree.
///
/// ```text
/// /products                      list, create
/// /products/pagination           paginated list
/// /products/{id}                 get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/products", product::router())
}
