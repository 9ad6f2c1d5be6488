//! Page state and pagination utilities

use serde::{Deserialize, Serialize};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total` items, never less than one
pub fn total_pages(total: usize, page_size: usize) -> usize {
    // Ensure page_size is at least 1 to avoid division by zero
    let page_size = page_size.max(1);
    total.div_ceil(page_size).max(1)
}

/// Slice out one page (1-indexed, clamped into range)
pub fn paginate<T>(data: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let page = page.clamp(1, total_pages(data.len(), page_size));
    let start = ((page - 1) * page_size).min(data.len());
    let end = (start + page_size).min(data.len());
    &data[start..end]
}

/// Current page of a list, always within `[1, total_pages]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    page: usize,
    page_size: usize,
    total: usize,
}

impl PageState {
    /// Start on page 1
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    /// Move to `page`, clamping out-of-range requests. Returns whether the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let target = page.clamp(1, self.total_pages());
        let changed = target != self.page;
        self.page = target;
        changed
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Replace the item count (data reloaded) and re-clamp the current page
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.page = self.page.clamp(1, self.total_pages());
    }

    /// Index range of the current page within the full data
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        let end = (start + self.page_size).min(self.total);
        start..end
    }

    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta::new(self.page, self.page_size, self.total)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, at least 1
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let total_pages = total_pages(total, limit);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// The "Página X de Y" label of the pagination bar
    pub fn label(&self) -> String {
        format!("Página {} de {}", self.page, self.total_pages)
    }
}
