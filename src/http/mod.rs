//! HTTP client module
//!
//! Provides the HTTP client used to fetch the catalog.
//!
//! # Features
//!
//! - **Timeouts**: one client-wide limit covering the whole exchange
//! - **Status Classification**: non-success responses become errors with the
//!   body preserved, so the server's message can be shown to the user

mod client;

pub use client::{HttpClient, HttpClientConfig};
