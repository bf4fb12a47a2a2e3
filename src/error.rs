//! Error types for catalog-feed
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! The session itself only ever surfaces one kind of failure to the user
//! (the catalog fetch failed); `Error::user_message` turns any of these
//! variants into the text shown in that case.

use serde_json::Value;
use thiserror::Error;

/// Message shown when a failed fetch carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch products. Please try again later.";

/// The main error type for catalog-feed
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Payload Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode catalog: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Message carried by the error response, if the server sent one.
    ///
    /// Only non-success responses whose body is a JSON object with a
    /// `message` field qualify. A non-empty string is used as sent, a
    /// non-zero number as its decimal text. Anything else does not count.
    pub fn response_message(&self) -> Option<String> {
        match self {
            Error::HttpStatus { body, .. } => {
                let value: Value = serde_json::from_str(body).ok()?;
                let message = value.get("message")?;
                match message {
                    Value::String(message) if !message.is_empty() => Some(message.clone()),
                    Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => {
                        Some(n.to_string())
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Text shown to the user when this error ends a catalog fetch
    pub fn user_message(&self) -> String {
        self.response_message()
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
    }
}

/// Result type alias for catalog-feed
pub type Result<T> = std::result::Result<T, Error>;
