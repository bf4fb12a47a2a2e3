//! Session state and its transitions
//!
//! All flags of a feed live in one `SessionState` value. Callers never set
//! fields directly; they go through the `begin_*` / `complete_*` / `fail_*`
//! transitions, each of which leaves the state consistent:
//!
//! - `visible` is always a prefix of `catalog`
//! - `visible` only ever grows until the next activation
//! - once `exhausted` is set, nothing reveals more items
//! - at most one fetch or load step is in flight

use crate::pagination::{PaginationState, PagingPlan};
use crate::types::{Catalog, Product};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// The one session-level failure: the catalog could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    /// Create a failure with the text shown to the user
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Why a load step did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A fetch or another load step is outstanding
    InFlight,
    /// Every item is already visible
    Exhausted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InFlight => f.write_str("a load is already in flight"),
            SkipReason::Exhausted => f.write_str("no more items"),
        }
    }
}

/// Result of a load step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// Items were appended to the visible window
    Appended { count: usize, visible: usize },
    /// The step found nothing left; pagination is now exhausted
    Exhausted,
    /// The step did not run
    Skipped { reason: SkipReason },
}

impl LoadOutcome {
    /// Number of items this step revealed
    pub fn appended(&self) -> usize {
        match self {
            LoadOutcome::Appended { count, .. } => *count,
            _ => 0,
        }
    }

    /// Check if the step was dropped
    pub fn is_skipped(&self) -> bool {
        matches!(self, LoadOutcome::Skipped { .. })
    }
}

/// Result of an activation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The catalog arrived and the initial window is visible
    Loaded {
        total: usize,
        visible: usize,
        exhausted: bool,
    },
    /// The fetch failed; the session is in its error state
    Failed { message: String },
    /// A fetch was already outstanding
    Skipped,
}

/// Read-only copy of the session, as handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub visible: Vec<Product>,
    pub loading: bool,
    pub exhausted: bool,
    pub page: usize,
    pub catalog_len: usize,
    pub error: Option<FetchFailure>,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Every mutable piece of a feed session
#[derive(Debug, Clone)]
pub struct SessionState {
    plan: PagingPlan,
    catalog: Catalog,
    visible: Vec<Product>,
    pagination: PaginationState,
    loading: bool,
    error: Option<FetchFailure>,
    fetched_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Fresh, empty state
    pub fn new(plan: PagingPlan) -> Self {
        Self {
            plan,
            catalog: Vec::new(),
            visible: Vec::new(),
            pagination: PaginationState::new(),
            loading: false,
            error: None,
            fetched_at: None,
        }
    }

    pub fn plan(&self) -> PagingPlan {
        self.plan
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn visible(&self) -> &[Product] {
        &self.visible
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.pagination.exhausted
    }

    pub fn error(&self) -> Option<&FetchFailure> {
        self.error.as_ref()
    }

    // ------------------------------------------------------------------------
    // Fetch transitions
    // ------------------------------------------------------------------------

    /// Start a fetch. Returns false (and changes nothing) if one is in flight.
    ///
    /// Starting a fetch restarts the session: catalog, window, cursor and
    /// error are all cleared.
    pub fn begin_fetch(&mut self) -> bool {
        if self.loading {
            return false;
        }
        *self = Self::new(self.plan);
        self.loading = true;
        true
    }

    /// Store the fetched catalog and reveal the initial window
    pub fn complete_fetch(&mut self, catalog: Catalog) -> FetchOutcome {
        let window = self.plan.initial_window(catalog.len());
        let exhausted = self.plan.exhausted_after_initial(catalog.len());

        self.visible = window.slice(&catalog).to_vec();
        self.catalog = catalog;
        self.pagination = PaginationState::after_initial_load(exhausted);
        self.fetched_at = Some(Utc::now());
        self.loading = false;

        FetchOutcome::Loaded {
            total: self.catalog.len(),
            visible: self.visible.len(),
            exhausted,
        }
    }

    /// Enter the error state
    pub fn fail_fetch(&mut self, failure: FetchFailure) -> FetchOutcome {
        let message = failure.message.clone();
        self.error = Some(failure);
        self.loading = false;
        FetchOutcome::Failed { message }
    }

    // ------------------------------------------------------------------------
    // Load-step transitions
    // ------------------------------------------------------------------------

    /// Start a load step, or say why it cannot run
    pub fn begin_load(&mut self) -> Result<(), SkipReason> {
        if self.loading {
            return Err(SkipReason::InFlight);
        }
        if self.pagination.exhausted {
            return Err(SkipReason::Exhausted);
        }
        self.loading = true;
        Ok(())
    }

    /// Reveal the window for the current cursor and finish the step
    pub fn complete_load(&mut self) -> LoadOutcome {
        let window = self.plan.window_for(self.pagination.page);
        let next = window.slice(&self.catalog);

        let outcome = if next.is_empty() {
            self.pagination.mark_exhausted();
            LoadOutcome::Exhausted
        } else {
            let count = next.len();
            self.visible.extend_from_slice(next);
            self.pagination.next_page();
            LoadOutcome::Appended {
                count,
                visible: self.visible.len(),
            }
        };

        self.loading = false;
        outcome
    }

    /// Copy out what the presentation layer needs
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            visible: self.visible.clone(),
            loading: self.loading,
            exhausted: self.pagination.exhausted,
            page: self.pagination.page,
            catalog_len: self.catalog.len(),
            error: self.error.clone(),
            fetched_at: self.fetched_at,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(PagingPlan::default())
    }
}
