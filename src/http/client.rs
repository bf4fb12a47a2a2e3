//! HTTP client for the catalog endpoint
//!
//! A thin layer over reqwest that:
//! - Applies the configured timeout, user agent and default headers
//! - Turns non-success responses into `Error::HttpStatus` with the body kept
//! - Classifies timeouts separately from other transport failures
//!
//! Failed requests are never retried.

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout, covering the body as well as the headers
    pub timeout: Duration,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("catalog-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&HttpConfig> for HttpClientConfig {
    fn from(http: &HttpConfig) -> Self {
        let mut config = Self {
            timeout: http.timeout(),
            default_headers: http.headers.clone(),
            ..Self::default()
        };
        if let Some(agent) = &http.user_agent {
            config.user_agent.clone_from(agent);
        }
        config
    }
}

/// HTTP client for read-only catalog requests
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// GET `url` and return the body of a successful response as text.
    ///
    /// The caller decodes the body, so a malformed payload is reported by
    /// the caller's decoder rather than as a transport error.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let mut req = self.client.get(url);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await.map_err(|e| self.transport_error(e, url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Request returned {}: GET {}", status.as_u16(), url);
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e, url))?;
        debug!("Request succeeded: GET {} ({} bytes)", url, body.len());
        Ok(body)
    }

    /// Classify a reqwest failure, whether it came from sending or from
    /// reading the body
    fn transport_error(&self, e: reqwest::Error, url: &str) -> Error {
        if e.is_timeout() {
            warn!("Request timeout after {:?}: GET {}", self.config.timeout, url);
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            warn!("Request failed: GET {}: {}", url, e);
            Error::Http(e)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
