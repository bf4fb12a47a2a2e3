//! Feed configuration
//!
//! Everything the session and the HTTP client need, loadable from YAML.
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock feed: 10 items up front, 5 per step, half a viewport of
//! threshold, one second of pacing.

use crate::error::{Error, Result};
use crate::types::{
    DEFAULT_ENDPOINT, END_REACHED_THRESHOLD, INITIAL_LOAD, ITEMS_PER_PAGE, LOAD_DELAY,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Feed Config
// ============================================================================

/// Complete feed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Catalog endpoint (GET, returns a JSON array of products)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Items revealed by the initial load
    #[serde(default = "default_initial_load")]
    pub initial_load: usize,

    /// Items revealed by each later load step
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Fraction of a viewport from the end that triggers a load
    #[serde(default = "default_threshold")]
    pub end_reached_threshold: f64,

    /// Pacing delay before each load step, in milliseconds (0 disables it)
    #[serde(default = "default_load_delay_ms")]
    pub load_delay_ms: u64,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_initial_load() -> usize {
    INITIAL_LOAD
}

fn default_page_size() -> usize {
    ITEMS_PER_PAGE
}

fn default_threshold() -> f64 {
    END_REACHED_THRESHOLD
}

fn default_load_delay_ms() -> u64 {
    LOAD_DELAY.as_millis() as u64
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            initial_load: default_initial_load(),
            page_size: default_page_size(),
            end_reached_threshold: default_threshold(),
            load_delay_ms: default_load_delay_ms(),
            http: HttpConfig::default(),
        }
    }
}

impl FeedConfig {
    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Pacing delay as a duration
    pub fn load_delay(&self) -> Duration {
        Duration::from_millis(self.load_delay_ms)
    }

    /// Check that the values make sense together
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }

        if !self.end_reached_threshold.is_finite() || self.end_reached_threshold <= 0.0 {
            return Err(Error::invalid_value(
                "end_reached_threshold",
                "must be a positive number",
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be at least 1"));
        }

        Ok(())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with the catalog request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

impl HttpConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
