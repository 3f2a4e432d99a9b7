//! Pagination parameters and responses

use serde::{Deserialize, Serialize};

/// Maximum number of items per page
pub const MAX_PAGE_LIMIT: usize = 100;

/// Page parameters for list operations
///
/// All parameters have sensible defaults; accessors clamp out-of-range
/// values instead of failing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl Page {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, ensuring it stays within bounds
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_LIMIT)
    }

    /// Index of the first item on this page.
    ///
    /// `Page` is deserialized from caller input, so the arithmetic saturates
    /// instead of overflowing on absurd page numbers.
    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

/// Paginated response structure
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: &Page, total: usize) -> Self {
        Self {
            data,
            pagination: PageInfo::new(page.page(), page.limit(), total),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PageInfo {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}
