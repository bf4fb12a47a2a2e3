// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # catalog-feed
//!
//! A product feed that fetches its whole catalog once and then reveals it
//! page by page as the user scrolls.
//!
//! ## Features
//!
//! - **Single Fetch**: one GET per activation, no retries
//! - **Simulated Pagination**: 10 items up front, then 5 per step
//! - **In-flight Guard**: overlapping fetches and steps are dropped, not queued
//! - **Screen Model**: error, empty, or list-with-footer, ready to render
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog_feed::catalog::HttpCatalogSource;
//! use catalog_feed::config::FeedConfig;
//! use catalog_feed::session::FeedSession;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> catalog_feed::Result<()> {
//!     let config = FeedConfig::default();
//!     let source = Arc::new(HttpCatalogSource::from_config(&config)?);
//!     let session = FeedSession::from_config(source, &config);
//!
//!     session.activate().await;
//!     while !session.is_exhausted().await {
//!         session.load_more().await;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   once    ┌──────────────────────────┐  snapshot  ┌──────────┐
//! │  Catalog   │ ────────► │       FeedSession        │ ─────────► │   View   │
//! │  Source    │           │ SessionState + PagingPlan│ ◄───────── │ (Screen) │
//! │ HTTP/File  │           │ activate() / load_more() │ end reached└──────────┘
//! └────────────┘           └──────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Product type and feed constants
pub mod types;

/// Feed configuration
pub mod config;

/// HTTP client
pub mod http;

/// Catalog sources
pub mod catalog;

/// Window arithmetic over the fetched catalog
pub mod pagination;

/// Feed session state and driver
pub mod session;

/// Screen model, scroll trigger and renderers
pub mod view;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::FeedConfig;
pub use session::FeedSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
