//! Last.fm API client implementation

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use reqwest::Client;
use scrobblekit_shared_config::{ConfigError, LastfmConfig};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::artist::{ArtistApi, ArtistRef, SimilarOptions};
use crate::decode;
use crate::error::{LastfmError, LastfmResult};
use crate::request::MethodCall;
use crate::wrappers::SimilarArtistsWrapper;

/// Last.fm API client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct LastfmClient {
    http_client: Client,
    config: LastfmConfig,
}

/// API key validation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyStatus {
    /// API key is valid
    Valid,
    /// API key is invalid
    Invalid,
    /// Could not determine validity (network error, etc.)
    Unknown(String),
}

impl fmt::Debug for LastfmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastfmClient")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.config.api_url)
            .field("format", &self.config.format)
            .finish()
    }
}

impl LastfmClient {
    /// Create a new Last.fm client for the public endpoint with the given API key
    ///
    /// # Errors
    /// Returns `LastfmError::MissingApiKey` if the API key is empty
    pub fn new(api_key: impl Into<String>) -> LastfmResult<Self> {
        Self::with_config(LastfmConfig::new(api_key))
    }

    /// Create a client from a full configuration
    ///
    /// # Errors
    /// - `LastfmError::MissingApiKey` if the API key is empty
    /// - `LastfmError::Config` if the endpoint URL is not a valid http(s) URL
    /// - `LastfmError::Http` if the HTTP client cannot be built
    pub fn with_config(config: LastfmConfig) -> LastfmResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LastfmError::MissingApiKey);
        }
        config.validate()?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .pool_max_idle_per_host(5)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create a Last.fm client from environment variables
    ///
    /// See [`LastfmConfig::from_env`] for the variables read.
    ///
    /// # Errors
    /// - `LastfmError::MissingApiKey` if `LASTFM_API_KEY` is not set or is blank
    /// - `LastfmError::Config` for any other invalid setting
    pub fn from_env() -> LastfmResult<Self> {
        match LastfmConfig::from_env() {
            Ok(config) => Self::with_config(config),
            Err(ConfigError::MissingEnvVar(_)) => Err(LastfmError::MissingApiKey),
            Err(ConfigError::InvalidValue(name, _)) if name == "LASTFM_API_KEY" => {
                Err(LastfmError::MissingApiKey)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &LastfmConfig {
        &self.config
    }

    /// Start building a call to a Last.fm method
    pub fn method(&self, name: impl Into<String>) -> MethodCall<'_> {
        MethodCall::new(self, name)
    }

    /// Artist resource client
    pub fn artist(&self) -> ArtistApi<'_> {
        ArtistApi::new(self)
    }

    /// Execute a method call and decode its envelope
    pub(crate) async fn call<W: DeserializeOwned>(
        &self,
        method: &str,
        params: &BTreeMap<String, String>,
    ) -> LastfmResult<W> {
        let text = self.make_request(method, params).await?;
        decode::decode(self.config.format, &text)
    }

    /// Make an API request and handle common error cases
    async fn make_request(
        &self,
        method: &str,
        params: &BTreeMap<String, String>,
    ) -> LastfmResult<String> {
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 3);
        query.push(("method", method));
        query.push(("api_key", &self.config.api_key));
        if let Some(format) = self.config.format.query_value() {
            query.push(("format", format));
        }
        query.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let response = self
            .http_client
            .get(&self.config.api_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LastfmError::Timeout
                } else {
                    LastfmError::Http(e)
                }
            })?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!(method, "Last.fm API rate limited");
            return Err(LastfmError::RateLimited);
        }

        let text = response.text().await.map_err(LastfmError::Http)?;

        // Last.fm reports most failures as an error body, often with a 4xx status
        if let Some(error) = decode::api_error(self.config.format, &text) {
            debug!(method, error = %error, "Last.fm returned an error response");
            return Err(error);
        }

        if !status.is_success() {
            return Err(LastfmError::UnexpectedStatus(status.as_u16()));
        }

        Ok(text)
    }

    /// Check if the API key is valid by making a simple request
    ///
    /// Returns `ApiKeyStatus` indicating whether the key is valid, invalid,
    /// or if the check could not be completed due to network issues.
    #[instrument(skip(self))]
    pub async fn validate_api_key(&self) -> ApiKeyStatus {
        // Try to get similar artists for a well-known artist
        let result = self
            .artist()
            .similar_call(
                &ArtistRef::name("The Beatles"),
                &SimilarOptions::default().limit(1),
            )
            .try_execute::<SimilarArtistsWrapper>()
            .await;

        match result {
            Ok(_) => ApiKeyStatus::Valid,
            Err(e) if e.is_invalid_api_key() => ApiKeyStatus::Invalid,
            Err(e) => ApiKeyStatus::Unknown(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrobblekit_shared_config::ResponseFormat;

    #[test]
    fn test_client_requires_api_key() {
        let result = LastfmClient::new("");
        assert!(matches!(result, Err(LastfmError::MissingApiKey)));

        let result = LastfmClient::new("   ");
        assert!(matches!(result, Err(LastfmError::MissingApiKey)));
    }

    #[test]
    fn test_client_accepts_valid_api_key() {
        let result = LastfmClient::new("test_api_key");
        assert!(result.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let config = LastfmConfig::with_url("test_api_key", "ws.audioscrobbler.com");
        let result = LastfmClient::with_config(config);
        assert!(matches!(result, Err(LastfmError::Config(_))));
    }

    #[test]
    fn test_client_debug_redacts_api_key() {
        let client = LastfmClient::new("secret_key").unwrap();
        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_client_keeps_format() {
        let config = LastfmConfig::new("test_api_key").with_format(ResponseFormat::Xml);
        let client = LastfmClient::with_config(config).unwrap();
        assert_eq!(client.config().format, ResponseFormat::Xml);
    }

    #[test]
    fn test_api_error_classification() {
        let not_found = LastfmError::Api {
            code: 6,
            message: "The artist you supplied could not be found".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_invalid_api_key());

        let bad_key = LastfmError::Api {
            code: 10,
            message: "Invalid API key".to_string(),
        };
        assert!(bad_key.is_invalid_api_key());
        assert!(!LastfmError::Timeout.is_not_found());
    }

    #[test]
    fn test_api_key_status_equality() {
        assert_eq!(ApiKeyStatus::Valid, ApiKeyStatus::Valid);
        assert_eq!(ApiKeyStatus::Invalid, ApiKeyStatus::Invalid);
        assert_ne!(ApiKeyStatus::Valid, ApiKeyStatus::Invalid);
    }
}
