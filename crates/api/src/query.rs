//! Query parameter types for API handlers.

use serde::Deserialize;

/// Pagination parameters (`?page=&page_size=`).
///
/// Both values stay raw strings so malformed input falls back to defaults
/// in `PageRequest::from_raw` instead of failing query extraction.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}
