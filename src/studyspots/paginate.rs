//! # Pagination
//!
//! [`Paginator`] windows a fixed, already-filtered sequence into pages.
//!
//! Pages are 1-indexed. The current page always lies in `[1, total_pages]`
//! when there is at least one page; an empty sequence has zero pages and the
//! current page stays at 1. Navigation clamps instead of failing, so
//! `go_to_page(0)` lands on the first page and `go_to_page(999)` on the last.
//!
//! A paginator owns its items for its whole lifetime. When the filtered set
//! changes, build a new one rather than mutating the old.

use serde::Serialize;

/// Summary of the paginator position, for rendering "Page X of Y" and
/// enabling navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current: usize,
    pub total: usize,
    pub item_count: usize,
    pub items_per_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone)]
pub struct Paginator<T> {
    items: Vec<T>,
    items_per_page: usize,
    current_page: usize,
}

impl<T> Paginator<T> {
    /// Creates a paginator positioned on page 1. A page size of 0 is treated as 1.
    pub fn new(items: Vec<T>, items_per_page: usize) -> Self {
        Self {
            items,
            items_per_page: items_per_page.max(1),
            current_page: 1,
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.items_per_page)
    }

    /// The slice for the current page, truncated to the available items.
    pub fn current_page_items(&self) -> &[T] {
        let start = (self.current_page - 1) * self.items_per_page;
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.items_per_page).min(self.items.len());
        &self.items[start..end]
    }

    /// Moves to `page`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        self.current_page = page.clamp(1, last);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Changing page density invalidates prior page numbers, so this also resets.
    pub fn set_items_per_page(&mut self, count: usize) {
        self.items_per_page = count.max(1);
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            current: self.current_page,
            total: self.total_pages(),
            item_count: self.items.len(),
            items_per_page: self.items_per_page,
            has_prev: self.has_prev(),
            has_next: self.has_next(),
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
