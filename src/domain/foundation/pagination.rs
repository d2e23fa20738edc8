//! Offset/limit pagination helpers.
//!
//! Query parameters arrive as `?page=2&per_page=50`; the offset arithmetic
//! lives here so repositories never repeat it.

use serde::{Deserialize, Serialize};

/// Upper bound on page size; larger requests are clamped, not rejected.
pub const MAX_PER_PAGE: u32 = 100;

const DEFAULT_PER_PAGE: u32 = 20;

/// Pagination query parameters. Pages are 1-based.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl PageQuery {
    /// Clamps page to at least 1 and per_page into `1..=MAX_PER_PAGE`.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> i64 {
        let q = self.normalized();
        i64::from(q.page - 1) * i64::from(q.per_page)
    }

    /// Number of rows to fetch.
    pub fn limit(&self) -> i64 {
        i64::from(self.normalized().per_page)
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// One page of results plus the counts clients need to render pagers.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Builds a page from fetched items and the unpaginated total.
    pub fn new(items: Vec<T>, total: u64, query: &PageQuery) -> Self {
        let query = query.normalized();
        let total_pages = total
            .div_ceil(u64::from(query.per_page))
            .try_into()
            .unwrap_or(u32::MAX);
        Self {
            items,
            total,
            page: query.page,
            per_page: query.per_page,
            total_pages,
        }
    }

    /// Maps the item type, keeping the counts.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
