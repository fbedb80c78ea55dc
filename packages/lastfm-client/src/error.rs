//! Last.fm API error types

use scrobblekit_shared_config::ConfigError;
use thiserror::Error;

/// Last.fm API client errors
#[derive(Error, Debug)]
pub enum LastfmError {
    /// API key is missing or invalid
    #[error("API key is required for Last.fm API access")]
    MissingApiKey,

    /// Client configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("Failed to parse Last.fm response: {0}")]
    Parse(#[from] serde_json::Error),

    /// XML parsing failed
    #[error("Failed to parse Last.fm XML response: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Last.fm API returned an error
    #[error("Last.fm API error {code}: {message}")]
    Api { code: i32, message: String },

    /// Non-success HTTP status without a Last.fm error body
    #[error("Last.fm responded with HTTP {0}")]
    UnexpectedStatus(u16),

    /// Rate limited by Last.fm
    #[error("Rate limited by Last.fm API")]
    RateLimited,

    /// Request timeout
    #[error("Request to Last.fm timed out")]
    Timeout,
}

impl LastfmError {
    /// Last.fm error code 6: the requested artist, album or track does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, LastfmError::Api { code: 6, .. })
    }

    /// Last.fm error code 10: invalid API key
    pub fn is_invalid_api_key(&self) -> bool {
        matches!(self, LastfmError::Api { code: 10, .. })
    }
}

/// Result type for Last.fm operations
pub type LastfmResult<T> = Result<T, LastfmError>;
