//! Catalog sources
//!
//! A source produces the whole catalog in one call. The session calls it
//! exactly once per activation.

use crate::config::FeedConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::Catalog;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

/// Something that can produce the full product catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every product, in order
    async fn fetch_catalog(&self) -> Result<Catalog>;

    /// Human-readable description of where the catalog comes from
    fn describe(&self) -> String;
}

/// Decode a catalog payload (a JSON array of products)
pub fn decode_catalog(body: &str) -> Result<Catalog> {
    serde_json::from_str(body).map_err(|e| Error::decode(e.to_string()))
}

// ============================================================================
// HTTP Source
// ============================================================================

/// Fetches the catalog with a single GET
#[derive(Debug)]
pub struct HttpCatalogSource {
    client: HttpClient,
    endpoint: String,
}

impl HttpCatalogSource {
    /// Create a source for an endpoint using an existing client
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Create a source from the feed configuration
    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig::from(&config.http))?;
        Ok(Self::new(client, config.endpoint.clone()))
    }

    /// The endpoint this source reads
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        debug!("Fetching catalog from {}", self.endpoint);
        let body = self.client.get_text(&self.endpoint).await?;
        let catalog = decode_catalog(&body)?;
        debug!("Catalog decoded: {} products", catalog.len());
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

// ============================================================================
// File Source
// ============================================================================

/// Reads the catalog from a local JSON file in the endpoint's format
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Create a source for a file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        debug!("Reading catalog from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::FileNotFound {
                    path: self.path.display().to_string(),
                },
                _ => Error::Io(e),
            })?;
        decode_catalog(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// Static Source
// ============================================================================

/// Serves a catalog held in memory, optionally after a simulated latency
#[derive(Debug, Default)]
pub struct StaticCatalogSource {
    catalog: Catalog,
    latency: Duration,
    fetches: AtomicUsize,
}

impl StaticCatalogSource {
    /// Create a source serving `catalog`
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            latency: Duration::ZERO,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Wait this long before answering each fetch
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory catalog ({} products)", self.catalog.len())
    }
}
