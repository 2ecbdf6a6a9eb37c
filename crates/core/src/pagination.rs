//! Page arithmetic for the paginated product listing.
//!
//! Pages are 1-based and ordered by ascending product id. Both query
//! values arrive as raw strings. A `page` that is not a positive integer
//! falls back to the first page and a malformed `page_size` to the default,
//! so the listing never fails on bad paging input.

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on the page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalized page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    /// Number of rows per page, within `1..=MAX_PAGE_SIZE`.
    pub page_size: i64,
}

impl PageRequest {
    /// Build a page request from raw query values.
    pub fn from_raw(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page_size = page_size.and_then(|s| s.trim().parse::<i64>().ok());
        Self {
            page: parse_page(page),
            page_size: clamp_page_size(page_size),
        }
    }

    /// Number of rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Maximum number of rows in this page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// Parse a 1-based page number.
///
/// Missing, blank, non-numeric and non-positive values all mean page 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Clamp a user-provided page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: Option<i64>) -> i64 {
    page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
