//! Last.fm connection configuration types

use std::fmt;
use std::str::FromStr;

use crate::{get_env_or_default, get_required_env, parse_env, ConfigError, ConfigResult};

/// Default Last.fm web service endpoint
const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default connection timeout in seconds
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

const DEFAULT_USER_AGENT: &str = concat!("scrobblekit/", env!("CARGO_PKG_VERSION"));

/// Response body format requested from the web service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    /// Value for the `format` query parameter
    ///
    /// XML is the service default, so no parameter is sent for it.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Self::Json => Some("json"),
            Self::Xml => None,
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(format!("unknown response format '{}' (expected json or xml)", other)),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Xml => write!(f, "xml"),
        }
    }
}

/// Last.fm web service configuration
#[derive(Clone)]
pub struct LastfmConfig {
    /// API key sent with every call
    pub api_key: String,

    /// Web service endpoint
    pub api_url: String,

    /// Response body format
    pub format: ResponseFormat,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// User agent sent with every call
    pub user_agent: String,
}

impl fmt::Debug for LastfmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LastfmConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("format", &self.format)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl LastfmConfig {
    /// Load Last.fm configuration from environment variables
    ///
    /// `LASTFM_API_KEY` is required; everything else falls back to defaults.
    pub fn from_env() -> ConfigResult<Self> {
        let api_key = get_required_env("LASTFM_API_KEY")?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "LASTFM_API_KEY".to_string(),
                "API key cannot be empty".to_string(),
            ));
        }

        let config = Self {
            api_key,
            api_url: get_env_or_default("LASTFM_API_URL", DEFAULT_API_URL),
            format: parse_env("LASTFM_FORMAT", ResponseFormat::Json)?,
            timeout_secs: parse_env("LASTFM_TIMEOUT", DEFAULT_TIMEOUT_SECS)?,
            connect_timeout_secs: parse_env(
                "LASTFM_CONNECT_TIMEOUT",
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )?,
            user_agent: get_env_or_default("LASTFM_USER_AGENT", DEFAULT_USER_AGENT),
        };
        config.validate()?;

        Ok(config)
    }

    /// Create a configuration for the public endpoint with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Create a configuration with a custom endpoint (useful for testing)
    pub fn with_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Switch the response format
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Check that the endpoint is an absolute http(s) URL
    pub fn validate(&self) -> ConfigResult<()> {
        let parsed = url::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::InvalidUrl("LASTFM_API_URL".to_string(), e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::InvalidUrl(
                "LASTFM_API_URL".to_string(),
                format!("unsupported scheme '{}'", scheme),
            )),
        }
    }
}

impl Default for LastfmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            format: ResponseFormat::Json,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 6] = [
        "LASTFM_API_KEY",
        "LASTFM_API_URL",
        "LASTFM_FORMAT",
        "LASTFM_TIMEOUT",
        "LASTFM_CONNECT_TIMEOUT",
        "LASTFM_USER_AGENT",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|name| (*name, None)).collect()
    }

    #[test]
    fn test_default_config() {
        let config = LastfmConfig::default();
        assert_eq!(config.api_url, "https://ws.audioscrobbler.com/2.0/");
        assert_eq!(config.format, ResponseFormat::Json);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.connect_timeout_secs, 5);
        assert!(config.user_agent.starts_with("scrobblekit/"));
    }

    #[test]
    fn test_from_env_requires_api_key() {
        temp_env::with_vars(unset_all(), || {
            let result = LastfmConfig::from_env();
            assert!(
                matches!(result, Err(ConfigError::MissingEnvVar(name)) if name == "LASTFM_API_KEY")
            );
        });
    }

    #[test]
    fn test_from_env_rejects_blank_api_key() {
        let mut vars = unset_all();
        vars[0] = ("LASTFM_API_KEY", Some("   "));
        temp_env::with_vars(vars, || {
            let result = LastfmConfig::from_env();
            assert!(matches!(result, Err(ConfigError::InvalidValue(_, _))));
        });
    }

    #[test]
    fn test_from_env_defaults() {
        let mut vars = unset_all();
        vars[0] = ("LASTFM_API_KEY", Some("abc123"));
        temp_env::with_vars(vars, || {
            let config = LastfmConfig::from_env().unwrap();
            assert_eq!(config.api_key, "abc123");
            assert_eq!(config.api_url, DEFAULT_API_URL);
            assert_eq!(config.format, ResponseFormat::Json);
            assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        });
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            vec![
                ("LASTFM_API_KEY", Some("abc123")),
                ("LASTFM_API_URL", Some("http://localhost:8080/2.0/")),
                ("LASTFM_FORMAT", Some("XML")),
                ("LASTFM_TIMEOUT", Some("30")),
                ("LASTFM_CONNECT_TIMEOUT", Some("2")),
                ("LASTFM_USER_AGENT", Some("tests/1.0")),
            ],
            || {
                let config = LastfmConfig::from_env().unwrap();
                assert_eq!(config.api_url, "http://localhost:8080/2.0/");
                assert_eq!(config.format, ResponseFormat::Xml);
                assert_eq!(config.timeout_secs, 30);
                assert_eq!(config.connect_timeout_secs, 2);
                assert_eq!(config.user_agent, "tests/1.0");
            },
        );
    }

    #[test]
    fn test_from_env_rejects_unknown_format() {
        let mut vars = unset_all();
        vars[0] = ("LASTFM_API_KEY", Some("abc123"));
        vars[2] = ("LASTFM_FORMAT", Some("yaml"));
        temp_env::with_vars(vars, || {
            let result = LastfmConfig::from_env();
            assert!(
                matches!(result, Err(ConfigError::InvalidValue(name, _)) if name == "LASTFM_FORMAT")
            );
        });
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = LastfmConfig::with_url("key", "not a url");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_, _))));

        let config = LastfmConfig::with_url("key", "ftp://ws.audioscrobbler.com/2.0/");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_, _))));

        let config = LastfmConfig::with_url("key", "http://127.0.0.1:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_response_format_parsing() {
        assert_eq!("json".parse::<ResponseFormat>().unwrap(), ResponseFormat::Json);
        assert_eq!(" Xml ".parse::<ResponseFormat>().unwrap(), ResponseFormat::Xml);
        assert!("csv".parse::<ResponseFormat>().is_err());
    }

    #[test]
    fn test_response_format_query_value() {
        assert_eq!(ResponseFormat::Json.query_value(), Some("json"));
        assert_eq!(ResponseFormat::Xml.query_value(), None);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LastfmConfig::new("secret_key");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
