//! Pagination types
//!
//! Window arithmetic over an in-memory catalog. Nothing here touches the
//! network: the whole catalog is already loaded, and "pages" are slices of
//! it revealed one step at a time.

use crate::config::FeedConfig;
use crate::types::{INITIAL_LOAD, ITEMS_PER_PAGE};

/// Page number the cursor holds once the initial window is visible
pub const FIRST_STEP_PAGE: usize = 2;

/// A half-open range `[start, end)` of catalog positions.
///
/// `end` may run past the catalog; `slice` clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Create a window
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Nominal number of positions, ignoring the catalog length
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the window covers no positions
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The part of `items` this window covers. Empty past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.min(items.len());
        let end = self.end.min(items.len()).max(start);
        &items[start..end]
    }
}

/// Sizes of the initial load and the later steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPlan {
    /// Items revealed by the initial load
    pub initial_load: usize,
    /// Items revealed by each later step
    pub page_size: usize,
}

impl Default for PagingPlan {
    fn default() -> Self {
        Self {
            initial_load: INITIAL_LOAD,
            page_size: ITEMS_PER_PAGE,
        }
    }
}

impl From<&FeedConfig> for PagingPlan {
    fn from(config: &FeedConfig) -> Self {
        Self::new(config.initial_load, config.page_size)
    }
}

impl PagingPlan {
    /// Create a plan
    pub fn new(initial_load: usize, page_size: usize) -> Self {
        Self {
            initial_load,
            page_size,
        }
    }

    /// Window shown right after the catalog arrives
    pub fn initial_window(&self, catalog_len: usize) -> PageWindow {
        PageWindow::new(0, catalog_len.min(self.initial_load))
    }

    /// Whether a catalog of this size is fully shown by the initial window
    pub fn exhausted_after_initial(&self, catalog_len: usize) -> bool {
        catalog_len <= self.initial_load
    }

    /// Window revealed by the step taken while the cursor is at `page`.
    ///
    /// Offset is `(page - 1) * page_size + (initial_load - page_size)`, so
    /// page 2 starts right after the initial window and each step after
    /// that advances by `page_size`. The subtraction comes last: from page 2
    /// on the sum never goes below zero, whatever the two sizes are.
    pub fn window_for(&self, page: usize) -> PageWindow {
        let start = (page.saturating_sub(1) * self.page_size + self.initial_load)
            .saturating_sub(self.page_size);
        PageWindow::new(start, start + self.page_size)
    }
}

/// Tracks the step cursor and exhaustion of a feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Step cursor; `FIRST_STEP_PAGE` once the initial window is visible
    pub page: usize,
    /// No further items remain to reveal
    pub exhausted: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            exhausted: false,
        }
    }
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// State right after the initial window was revealed
    pub fn after_initial_load(exhausted: bool) -> Self {
        Self {
            page: FIRST_STEP_PAGE,
            exhausted,
        }
    }

    /// Mark pagination as complete. There is no way back.
    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }
}
