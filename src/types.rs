//! Common types used throughout catalog-feed
//!
//! The product record, the feed constants, and a few type aliases shared
//! by the catalog, session and view modules.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Feed Constants
// ============================================================================

/// Number of products revealed by the initial load
pub const INITIAL_LOAD: usize = 10;

/// Number of products revealed by each later load step
pub const ITEMS_PER_PAGE: usize = 5;

/// Fraction of a viewport from the list end that triggers a load
pub const END_REACHED_THRESHOLD: f64 = 0.5;

/// Pacing delay before each simulated page load
pub const LOAD_DELAY: Duration = Duration::from_millis(1000);

/// Catalog endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://fakestoreapi.com/products";

// ============================================================================
// Product
// ============================================================================

/// A single catalog entry.
///
/// Only the four fields below are read from the payload; anything else the
/// endpoint sends (category, description, rating...) is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl Product {
    /// Create a product
    pub fn new(id: i64, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
        }
    }

    /// Stable list key for this product
    pub fn key(&self) -> String {
        format!("product-{}", self.id)
    }

    /// Price as displayed in the list
    pub fn display_price(&self) -> String {
        format!("${}", self.price)
    }
}

/// The full product collection, in endpoint order
pub type Catalog = Vec<Product>;
