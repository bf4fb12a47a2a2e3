//! End-reached detection
//!
//! The list asks for more whenever the unseen content below the viewport
//! is within `threshold` viewports of the end.

use crate::session::{FeedSession, LoadOutcome};
use crate::types::END_REACHED_THRESHOLD;
use tracing::trace;

/// Scroll position, in whatever unit the surface measures (rows, pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top
    pub offset: f64,
    /// Height of the visible area
    pub viewport: f64,
    /// Height of the whole list
    pub content: f64,
}

impl ScrollMetrics {
    pub fn new(offset: f64, viewport: f64, content: f64) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    /// Content left below the viewport. Negative once scrolled past the end.
    pub fn distance_from_end(&self) -> f64 {
        self.content - (self.offset + self.viewport)
    }
}

/// Fires `load_more` when the scroll position nears the list end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndReachedTrigger {
    threshold: f64,
}

impl Default for EndReachedTrigger {
    fn default() -> Self {
        Self::new(END_REACHED_THRESHOLD)
    }
}

impl EndReachedTrigger {
    /// Trigger within `threshold` viewports of the end
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether this position counts as having reached the end
    pub fn is_reached(&self, metrics: &ScrollMetrics) -> bool {
        metrics.distance_from_end() <= self.threshold * metrics.viewport
    }

    /// Handle a scroll event: forwards to `load_more` when the end is reached.
    ///
    /// Returns `None` when the position is not near the end.
    pub async fn on_scroll(
        &self,
        metrics: &ScrollMetrics,
        session: &FeedSession,
    ) -> Option<LoadOutcome> {
        if !self.is_reached(metrics) {
            return None;
        }
        trace!(
            distance = metrics.distance_from_end(),
            "End reached, requesting more"
        );
        Some(session.load_more().await)
    }
}
