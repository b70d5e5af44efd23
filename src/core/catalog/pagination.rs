//! Pagination arithmetic over the filtered item count.
//!
//! `PaginationState` is a small `Copy` value; every operation takes the
//! current state and returns the next one. After any operation settles,
//! `1 <= current_page <= max(total_pages, 1)` holds, and
//! `total_pages == ceil(total_items / items_per_page)` (0 for no items).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{CatalogError, Result};

// ── Page size ───────────────────────────────────────────────────────────────

/// The enumerated page-size options offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Four,
    #[default]
    Eight,
    Twelve,
    Sixteen,
}

impl PageSize {
    /// All variants in selector order.
    pub const ALL: [PageSize; 4] = [Self::Four, Self::Eight, Self::Twelve, Self::Sixteen];

    /// Numeric values accepted at the boundary.
    pub const OPTIONS: [usize; 4] = [4, 8, 12, 16];

    pub const fn get(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
            Self::Twelve => 12,
            Self::Sixteen => 16,
        }
    }

    /// Next option, wrapping around. Used by the size selector.
    pub fn next(self) -> Self {
        match self {
            Self::Four => Self::Eight,
            Self::Eight => Self::Twelve,
            Self::Twelve => Self::Sixteen,
            Self::Sixteen => Self::Four,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = CatalogError;

    fn try_from(value: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(CatalogError::InvalidPageSize { requested: value })
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// ── Page range ──────────────────────────────────────────────────────────────

/// 1-based inclusive bounds of the page window, for "Showing 9 to 16 of 20".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

// ── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    current_page: usize,
    page_size: PageSize,
    total_items: usize,
    total_pages: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PageSize::default(),
            total_items: 0,
            total_pages: 0,
        }
    }
}

impl PaginationState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn items_per_page(&self) -> usize {
        self.page_size.get()
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Zero when there are no items.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Page count as shown to the user ("page 1 of 1" for an empty set).
    pub fn display_total_pages(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Recompute the page count and pull the current page into range.
    fn settle(mut self) -> Self {
        self.total_pages = self.total_items.div_ceil(self.page_size.get());
        self.current_page = self.current_page.clamp(1, self.total_pages.max(1));
        self
    }

    /// Record a new filtered count. Clamps the current page down if the
    /// set shrank below it.
    #[must_use]
    pub fn set_total_items(mut self, total_items: usize) -> Self {
        self.total_items = total_items;
        self.settle()
    }

    /// Change the page size from an untrusted numeric value.
    pub fn set_items_per_page(self, size: usize) -> Result<Self> {
        Ok(self.with_page_size(PageSize::try_from(size)?))
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        if self.total_items == 0 {
            self.current_page = 1;
        }
        self.settle()
    }

    /// Jump to `page`, clamped to `[1, max(total_pages, 1)]`.
    #[must_use]
    pub fn set_current_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self.settle()
    }

    /// Advance one page. Stops at the last known page; with no pages there
    /// is nothing to advance to.
    #[must_use]
    pub fn next(mut self) -> Self {
        if self.has_next() {
            self.current_page += 1;
        }
        self
    }

    #[must_use]
    pub fn prev(mut self) -> Self {
        if self.has_prev() {
            self.current_page -= 1;
        }
        self
    }

    #[must_use]
    pub fn first(mut self) -> Self {
        self.current_page = 1;
        self
    }

    #[must_use]
    pub fn last(mut self) -> Self {
        if self.total_pages > 0 {
            self.current_page = self.total_pages;
        }
        self
    }

    /// Back to the default state (page 1, default size, no items).
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        (self.current_page - 1) * self.page_size.get()
    }

    /// The current page window of `items`. Empty when out of range.
    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset();
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size.get()).min(items.len());
        &items[start..end]
    }

    pub fn range(&self) -> Option<PageRange> {
        let start = self.offset() + 1;
        if self.total_items == 0 || start > self.total_items {
            return None;
        }
        Some(PageRange {
            start,
            end: (self.offset() + self.page_size.get()).min(self.total_items),
            total: self.total_items,
        })
    }
}
