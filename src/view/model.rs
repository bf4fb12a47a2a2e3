//! Screen model
//!
//! What the feed shows for a given session snapshot. Exactly one of three
//! screens applies: the error text, the empty message, or the list.

use crate::session::SessionSnapshot;
use crate::types::Product;
use serde::Serialize;

/// Shown when there is nothing to list and nothing loading
pub const EMPTY_MESSAGE: &str = "No products available";

/// Shown at the end of the list while a fetch or step is in flight
pub const LOADING_FOOTER: &str = "Loading...";

/// One rendered list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub key: String,
    pub title: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for Row {
    fn from(product: &Product) -> Self {
        Self {
            key: product.key(),
            title: product.title.clone(),
            price: product.display_price(),
            image: product.image.clone(),
        }
    }
}

/// The whole screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    /// The fetch failed; nothing else is shown
    Error { message: String },
    /// Nothing visible and nothing loading
    Empty,
    /// The visible window, with a loading footer while something is in flight
    List { rows: Vec<Row>, loading_footer: bool },
}

impl Screen {
    /// Build the screen for a snapshot
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        if let Some(failure) = &snapshot.error {
            return Screen::Error {
                message: failure.message.clone(),
            };
        }

        if snapshot.visible.is_empty() && !snapshot.loading {
            return Screen::Empty;
        }

        Screen::List {
            rows: snapshot.visible.iter().map(Row::from).collect(),
            loading_footer: snapshot.loading,
        }
    }

    /// Rows on screen (none for the error and empty screens)
    pub fn rows(&self) -> &[Row] {
        match self {
            Screen::List { rows, .. } => rows,
            _ => &[],
        }
    }
}
