//! Feed session
//!
//! Drives a `SessionState` from async code: one catalog fetch per
//! activation, then paced load steps on demand. The state lock is only held
//! for the duration of a transition, never across the fetch or the pacing
//! delay, so a second call arriving mid-operation sees the in-flight flag
//! and is dropped.

use super::state::{
    FetchFailure, FetchOutcome, LoadOutcome, SessionSnapshot, SessionState,
};
use crate::catalog::CatalogSource;
use crate::config::FeedConfig;
use crate::pagination::PagingPlan;
use crate::types::LOAD_DELAY;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// A single-screen product feed
#[derive(Clone)]
pub struct FeedSession {
    source: Arc<dyn CatalogSource>,
    state: Arc<RwLock<SessionState>>,
    load_delay: Duration,
}

impl FeedSession {
    /// Create a session with the default plan and pacing
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self::with_plan(source, PagingPlan::default())
    }

    /// Create a session with a custom plan
    pub fn with_plan(source: Arc<dyn CatalogSource>, plan: PagingPlan) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(SessionState::new(plan))),
            load_delay: LOAD_DELAY,
        }
    }

    /// Create a session from the feed configuration
    pub fn from_config(source: Arc<dyn CatalogSource>, config: &FeedConfig) -> Self {
        Self::with_plan(source, PagingPlan::from(config)).with_load_delay(config.load_delay())
    }

    /// Set the pacing delay before each load step (zero disables it)
    #[must_use]
    pub fn with_load_delay(mut self, delay: Duration) -> Self {
        self.load_delay = delay;
        self
    }

    pub fn load_delay(&self) -> Duration {
        self.load_delay
    }

    /// Where the catalog comes from
    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    /// Fetch the catalog and reveal the initial window.
    ///
    /// A call made while a fetch or load step is outstanding does nothing.
    /// Otherwise the session restarts from empty, so this is also how an
    /// error state gets cleared.
    pub async fn activate(&self) -> FetchOutcome {
        let started = self.state.write().await.begin_fetch();
        if !started {
            debug!("Activation ignored: an operation is in flight");
            return FetchOutcome::Skipped;
        }

        info!("Fetching catalog from {}", self.source.describe());
        match self.source.fetch_catalog().await {
            Ok(catalog) => {
                let outcome = self.state.write().await.complete_fetch(catalog);
                if let FetchOutcome::Loaded {
                    total,
                    visible,
                    exhausted,
                } = &outcome
                {
                    info!(total, visible, exhausted, "Catalog loaded");
                }
                outcome
            }
            Err(e) => {
                error!("Error fetching catalog: {e}");
                let failure = FetchFailure::new(e.user_message());
                self.state.write().await.fail_fetch(failure)
            }
        }
    }

    /// Reveal the next page of the catalog.
    ///
    /// Dropped (not queued) while anything is in flight or once the catalog
    /// is exhausted. Safe to call on every end-reached signal.
    pub async fn load_more(&self) -> LoadOutcome {
        if let Err(reason) = self.state.write().await.begin_load() {
            debug!("Load step skipped: {reason}");
            return LoadOutcome::Skipped { reason };
        }

        if !self.load_delay.is_zero() {
            tokio::time::sleep(self.load_delay).await;
        }

        let outcome = self.state.write().await.complete_load();
        match outcome {
            LoadOutcome::Appended { count, visible } => {
                debug!(count, visible, "Page appended");
            }
            LoadOutcome::Exhausted => info!("Catalog exhausted"),
            LoadOutcome::Skipped { .. } => {}
        }
        outcome
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    /// Check if a fetch or load step is outstanding
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading()
    }

    /// Check if every item is visible
    pub async fn is_exhausted(&self) -> bool {
        self.state.read().await.is_exhausted()
    }
}

impl std::fmt::Debug for FeedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSession")
            .field("source", &self.source.describe())
            .field("load_delay", &self.load_delay)
            .finish_non_exhaustive()
    }
}
