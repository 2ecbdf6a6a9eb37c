use std::sync::Arc;

use catalog_db::context::ProductContext;
use catalog_db::store::ProductStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backing product store (PostgreSQL or in-memory).
    pub store: Arc<dyn ProductStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Open a fresh unit of work for the current request.
    pub fn products(&self) -> ProductContext {
        ProductContext::new(Arc::clone(&self.store))
    }
}
