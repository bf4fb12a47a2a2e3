//! Tests for the feed session

use super::*;
use crate::catalog::{CatalogSource, StaticCatalogSource};
use crate::error::{Error, Result, FALLBACK_ERROR_MESSAGE};
use crate::pagination::PagingPlan;
use crate::types::{Catalog, Product};
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn catalog(count: i64) -> Catalog {
    (1..=count)
        .map(|id| {
            Product::new(
                id,
                format!("Product {id}"),
                id as f64 + 0.99,
                format!("https://img.example.com/{id}.png"),
            )
        })
        .collect()
}

fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id).collect()
}

fn session_over(count: i64) -> FeedSession {
    FeedSession::new(Arc::new(StaticCatalogSource::new(catalog(count))))
        .with_load_delay(Duration::ZERO)
}

/// Fails the first `failures` fetches with `make_error()`, then
/// serves `catalog`.
struct FlakySource {
    failures: usize,
    calls: AtomicUsize,
    catalog: Catalog,
    make_error: fn() -> Error,
}

#[async_trait]
impl CatalogSource for FlakySource {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err((self.make_error)())
        } else {
            Ok(self.catalog.clone())
        }
    }

    fn describe(&self) -> String {
        "flaky".to_string()
    }
}

fn failing(make_error: fn() -> Error) -> FeedSession {
    FeedSession::new(Arc::new(FlakySource {
        failures: usize::MAX,
        calls: AtomicUsize::new(0),
        catalog: Vec::new(),
        make_error,
    }))
}

// ============================================================================
// SessionState Transitions
// ============================================================================

#[test]
fn test_state_starts_empty() {
    let state = SessionState::default();
    assert!(state.catalog().is_empty());
    assert!(state.visible().is_empty());
    assert!(!state.is_loading());
    assert!(!state.is_exhausted());
    assert!(state.error().is_none());
    assert_eq!(state.pagination().page, 1);
}

#[test]
fn test_state_begin_fetch_is_exclusive() {
    let mut state = SessionState::default();
    assert!(state.begin_fetch());
    assert!(state.is_loading());
    assert!(!state.begin_fetch());
    assert_eq!(state.begin_load(), Err(SkipReason::InFlight));
}

#[test]
fn test_state_complete_fetch_reveals_initial_window() {
    let mut state = SessionState::default();
    state.begin_fetch();
    let outcome = state.complete_fetch(catalog(20));

    assert_eq!(
        outcome,
        FetchOutcome::Loaded {
            total: 20,
            visible: 10,
            exhausted: false
        }
    );
    assert_eq!(ids(state.visible()), (1..=10).collect::<Vec<_>>());
    assert_eq!(state.pagination().page, 2);
    assert!(!state.is_loading());
    assert!(state.snapshot().fetched_at.is_some());
}

#[test]
fn test_state_fail_fetch() {
    let mut state = SessionState::default();
    state.begin_fetch();
    let outcome = state.fail_fetch(FetchFailure::new("Service unavailable"));

    assert_eq!(
        outcome,
        FetchOutcome::Failed {
            message: "Service unavailable".to_string()
        }
    );
    assert_eq!(
        state.error().map(ToString::to_string),
        Some("Service unavailable".to_string())
    );
    assert!(!state.is_loading());
    assert!(state.visible().is_empty());
}

#[test]
fn test_state_begin_fetch_restarts_session() {
    let mut state = SessionState::new(PagingPlan::default());
    state.begin_fetch();
    state.fail_fetch(FetchFailure::new("boom"));

    assert!(state.begin_fetch());
    assert!(state.error().is_none());
    assert!(state.visible().is_empty());
    assert_eq!(state.pagination().page, 1);
}

#[test]
fn test_state_load_step_after_exhaustion_is_refused() {
    let mut state = SessionState::default();
    state.begin_fetch();
    state.complete_fetch(catalog(7));

    assert!(state.is_exhausted());
    assert_eq!(state.begin_load(), Err(SkipReason::Exhausted));
    assert_eq!(state.visible().len(), 7);
}

// ============================================================================
// Activation
// ============================================================================

#[tokio::test]
async fn test_twenty_items_page_through_to_exhaustion() {
    let session = session_over(20);

    assert_eq!(
        session.activate().await,
        FetchOutcome::Loaded {
            total: 20,
            visible: 10,
            exhausted: false
        }
    );
    let snapshot = session.snapshot().await;
    assert_eq!(ids(&snapshot.visible), (1..=10).collect::<Vec<_>>());
    assert!(!snapshot.exhausted);

    assert_eq!(
        session.load_more().await,
        LoadOutcome::Appended {
            count: 5,
            visible: 15
        }
    );
    let snapshot = session.snapshot().await;
    assert_eq!(ids(&snapshot.visible), (1..=15).collect::<Vec<_>>());
    assert_eq!(snapshot.page, 3);

    assert_eq!(
        session.load_more().await,
        LoadOutcome::Appended {
            count: 5,
            visible: 20
        }
    );
    assert_eq!(session.snapshot().await.page, 4);

    assert_eq!(session.load_more().await, LoadOutcome::Exhausted);
    let snapshot = session.snapshot().await;
    assert!(snapshot.exhausted);
    assert_eq!(ids(&snapshot.visible), (1..=20).collect::<Vec<_>>());
    assert_eq!(snapshot.page, 4);

    assert_eq!(
        session.load_more().await,
        LoadOutcome::Skipped {
            reason: SkipReason::Exhausted
        }
    );
    assert_eq!(session.snapshot().await.visible.len(), 20);
}

#[tokio::test]
async fn test_small_catalog_is_exhausted_immediately() {
    let session = session_over(7);

    assert_eq!(
        session.activate().await,
        FetchOutcome::Loaded {
            total: 7,
            visible: 7,
            exhausted: true
        }
    );
    assert!(session.is_exhausted().await);

    let before = session.snapshot().await;
    for _ in 0..3 {
        assert!(session.load_more().await.is_skipped());
    }
    assert_eq!(session.snapshot().await, before);
}

#[tokio::test]
async fn test_exactly_initial_load_is_exhausted() {
    let session = session_over(10);
    session.activate().await;
    assert!(session.is_exhausted().await);
    assert_eq!(session.snapshot().await.visible.len(), 10);
}

#[tokio::test]
async fn test_partial_last_page() {
    let session = session_over(11);
    session.activate().await;

    assert_eq!(session.load_more().await.appended(), 1);
    assert_eq!(session.load_more().await, LoadOutcome::Exhausted);
    assert_eq!(session.snapshot().await.visible.len(), 11);
}

#[tokio::test]
async fn test_empty_catalog() {
    let session = session_over(0);
    assert_eq!(
        session.activate().await,
        FetchOutcome::Loaded {
            total: 0,
            visible: 0,
            exhausted: true
        }
    );
    assert!(session.snapshot().await.visible.is_empty());
}

#[tokio::test]
async fn test_visible_is_always_a_growing_prefix() {
    let full = catalog(37);
    let session = FeedSession::new(Arc::new(StaticCatalogSource::new(full.clone())))
        .with_load_delay(Duration::ZERO);
    session.activate().await;

    let mut last_len = 0;
    loop {
        let snapshot = session.snapshot().await;
        assert!(snapshot.visible.len() >= last_len);
        assert_eq!(snapshot.visible.as_slice(), &full[..snapshot.visible.len()]);
        last_len = snapshot.visible.len();

        if session.load_more().await.is_skipped() {
            break;
        }
    }
    assert_eq!(last_len, 37);
}

#[tokio::test]
async fn test_custom_plan() {
    let session = FeedSession::with_plan(
        Arc::new(StaticCatalogSource::new(catalog(9))),
        PagingPlan::new(4, 3),
    )
    .with_load_delay(Duration::ZERO);

    session.activate().await;
    assert_eq!(session.snapshot().await.visible.len(), 4);
    assert_eq!(session.load_more().await.appended(), 3);
    assert_eq!(session.load_more().await.appended(), 2);
    assert_eq!(session.load_more().await, LoadOutcome::Exhausted);
}

#[tokio::test]
async fn test_plan_with_initial_load_below_page_size_keeps_prefix() {
    let session = FeedSession::with_plan(
        Arc::new(StaticCatalogSource::new(catalog(12))),
        PagingPlan::new(2, 5),
    )
    .with_load_delay(Duration::ZERO);

    session.activate().await;
    assert_eq!(ids(&session.snapshot().await.visible), vec![1, 2]);

    assert_eq!(session.load_more().await.appended(), 5);
    assert_eq!(
        ids(&session.snapshot().await.visible),
        (1..=7).collect::<Vec<_>>()
    );

    assert_eq!(session.load_more().await.appended(), 5);
    assert_eq!(session.load_more().await, LoadOutcome::Exhausted);
    assert_eq!(
        ids(&session.snapshot().await.visible),
        (1..=12).collect::<Vec<_>>()
    );
}

// ============================================================================
// Fetch Failures
// ============================================================================

#[tokio::test]
async fn test_failure_uses_response_message() {
    let session = failing(|| Error::http_status(503, r#"{"message":"Service unavailable"}"#));

    assert_eq!(
        session.activate().await,
        FetchOutcome::Failed {
            message: "Service unavailable".to_string()
        }
    );
    let snapshot = session.snapshot().await;
    assert_eq!(
        snapshot.error,
        Some(FetchFailure::new("Service unavailable"))
    );
    assert!(snapshot.visible.is_empty());
    assert!(!snapshot.loading);
}

#[tokio::test]
async fn test_failure_without_message_uses_fallback() {
    let session = failing(|| Error::Timeout { timeout_ms: 30_000 });

    assert_eq!(
        session.activate().await,
        FetchOutcome::Failed {
            message: FALLBACK_ERROR_MESSAGE.to_string()
        }
    );
    assert_eq!(
        session.snapshot().await.error,
        Some(FetchFailure::new(FALLBACK_ERROR_MESSAGE))
    );
}

#[tokio::test]
async fn test_failure_is_not_retried() {
    let source = Arc::new(FlakySource {
        failures: 1,
        calls: AtomicUsize::new(0),
        catalog: catalog(20),
        make_error: || Error::http_status(500, ""),
    });
    let session = FeedSession::new(source.clone()).with_load_delay(Duration::ZERO);

    session.activate().await;
    // paging does not fetch again, and does not clear the error
    session.load_more().await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    assert!(session.snapshot().await.error.is_some());
}

#[tokio::test]
async fn test_reactivation_clears_error() {
    let source = Arc::new(FlakySource {
        failures: 1,
        calls: AtomicUsize::new(0),
        catalog: catalog(20),
        make_error: || Error::http_status(500, ""),
    });
    let session = FeedSession::new(source.clone()).with_load_delay(Duration::ZERO);

    assert!(matches!(
        session.activate().await,
        FetchOutcome::Failed { .. }
    ));
    assert!(matches!(
        session.activate().await,
        FetchOutcome::Loaded { visible: 10, .. }
    ));

    let snapshot = session.snapshot().await;
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.visible.len(), 10);
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// In-flight Guard
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_load_waits_for_pacing_delay() {
    let session = FeedSession::new(Arc::new(StaticCatalogSource::new(catalog(20))));
    assert_eq!(session.load_delay(), Duration::from_millis(1000));
    session.activate().await;

    let start = tokio::time::Instant::now();
    session.load_more().await;
    assert!(start.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_loads_are_dropped() {
    let session = FeedSession::new(Arc::new(StaticCatalogSource::new(catalog(30))));
    session.activate().await;

    let (first, second) = tokio::join!(session.load_more(), session.load_more());

    assert_eq!(
        first,
        LoadOutcome::Appended {
            count: 5,
            visible: 15
        }
    );
    assert_eq!(
        second,
        LoadOutcome::Skipped {
            reason: SkipReason::InFlight
        }
    );
    assert_eq!(session.snapshot().await.page, 3);
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_end_reached_signals_loads_one_page() {
    let session = FeedSession::new(Arc::new(StaticCatalogSource::new(catalog(30))));
    session.activate().await;

    let outcomes =
        futures::future::join_all((0..5).map(|_| session.load_more())).await;

    assert_eq!(outcomes.iter().filter(|o| !o.is_skipped()).count(), 1);
    assert_eq!(session.snapshot().await.visible.len(), 15);
}

#[tokio::test(start_paused = true)]
async fn test_loading_flag_visible_during_step() {
    let session = FeedSession::new(Arc::new(StaticCatalogSource::new(catalog(20))));
    session.activate().await;

    let (_, during) = tokio::join!(session.load_more(), session.snapshot());
    assert!(during.loading);
    assert_eq!(during.visible.len(), 10);

    assert!(!session.is_loading().await);
}

#[tokio::test(start_paused = true)]
async fn test_load_during_fetch_is_dropped() {
    let source = Arc::new(
        StaticCatalogSource::new(catalog(20)).with_latency(Duration::from_millis(500)),
    );
    let session = FeedSession::new(source.clone());

    let (fetched, loaded, again) =
        tokio::join!(session.activate(), session.load_more(), session.activate());

    assert!(matches!(fetched, FetchOutcome::Loaded { visible: 10, .. }));
    assert_eq!(
        loaded,
        LoadOutcome::Skipped {
            reason: SkipReason::InFlight
        }
    );
    assert_eq!(again, FetchOutcome::Skipped);
    assert_eq!(source.fetch_count(), 1);
    assert_eq!(session.snapshot().await.visible.len(), 10);
}
