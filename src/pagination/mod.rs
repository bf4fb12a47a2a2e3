//! Pagination module
//!
//! Simulated pagination over a catalog that is already in memory.
//!
//! # Overview
//!
//! The first `initial_load` items are revealed as soon as the catalog
//! arrives. Every later step reveals `page_size` more, until a step finds
//! nothing left and pagination is marked exhausted for good.

mod types;

pub use types::{PageWindow, PaginationState, PagingPlan, FIRST_STEP_PAGE};
