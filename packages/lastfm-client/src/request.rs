//! Method call builder and executor
//!
//! Every Last.fm operation is a `GET` with a `method` name and a flat set of
//! string parameters. [`MethodCall`] collects those parameters and hands them
//! to the owning [`LastfmClient`] for execution.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::LastfmClient;
use crate::error::LastfmResult;

/// A value that can be sent as a Last.fm query parameter
///
/// Returning `None` leaves the parameter out of the call entirely. Empty
/// strings and `None` options are never sent; booleans are sent as `"1"` or
/// `"0"`.
pub trait ParamValue {
    fn to_param(&self) -> Option<String>;
}

impl ParamValue for str {
    fn to_param(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl ParamValue for String {
    fn to_param(&self) -> Option<String> {
        self.as_str().to_param()
    }
}

impl ParamValue for bool {
    fn to_param(&self) -> Option<String> {
        Some(if *self { "1" } else { "0" }.to_string())
    }
}

impl ParamValue for u32 {
    fn to_param(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: ParamValue> ParamValue for Option<T> {
    fn to_param(&self) -> Option<String> {
        self.as_ref().and_then(ParamValue::to_param)
    }
}

impl<T: ParamValue + ?Sized> ParamValue for &T {
    fn to_param(&self) -> Option<String> {
        (**self).to_param()
    }
}

/// A pending call to one Last.fm method
#[derive(Debug, Clone)]
#[must_use = "a method call does nothing until it is executed"]
pub struct MethodCall<'a> {
    client: &'a LastfmClient,
    method: String,
    params: BTreeMap<String, String>,
}

impl<'a> MethodCall<'a> {
    pub(crate) fn new(client: &'a LastfmClient, method: impl Into<String>) -> Self {
        Self {
            client,
            method: method.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter, skipping it when the value is empty
    ///
    /// Setting the same key twice keeps the last value.
    pub fn with_param(mut self, key: &str, value: impl ParamValue) -> Self {
        if let Some(value) = value.to_param() {
            self.params.insert(key.to_string(), value);
        }
        self
    }

    /// Remote method name, e.g. `artist.getInfo`
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Parameters that will be sent, excluding `method`, `api_key` and `format`
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Look up a single parameter
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Execute the call, returning `None` when no response envelope was produced
    ///
    /// Transport failures, Last.fm error responses and undecodable bodies are
    /// logged and collapsed into `None`. Use [`MethodCall::try_execute`] to
    /// keep the cause.
    pub async fn execute<W: DeserializeOwned>(self) -> Option<W> {
        let method = self.method.clone();
        match self.try_execute().await {
            Ok(wrapper) => Some(wrapper),
            Err(e) => {
                warn!(method = %method, error = %e, "Last.fm call produced no result");
                None
            }
        }
    }

    /// Execute the call and decode the response envelope
    pub async fn try_execute<W: DeserializeOwned>(self) -> LastfmResult<W> {
        debug!(method = %self.method, params = ?self.params, "Calling Last.fm");
        self.client.call(&self.method, &self.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wrappers::TopTagsWrapper;
    use scrobblekit_shared_config::LastfmConfig;
    use tracing_test::traced_test;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> LastfmClient {
        LastfmClient::new("test_api_key").unwrap()
    }

    #[test]
    fn test_bool_params_are_one_or_zero() {
        assert_eq!(true.to_param().as_deref(), Some("1"));
        assert_eq!(false.to_param().as_deref(), Some("0"));
    }

    #[test]
    fn test_empty_values_are_skipped() {
        assert_eq!("".to_param(), None);
        assert_eq!(String::new().to_param(), None);
        assert_eq!(None::<u32>.to_param(), None);
        assert_eq!(Some(String::new()).to_param(), None);
        assert_eq!(Some(25u32).to_param().as_deref(), Some("25"));
    }

    #[test]
    fn test_builder_omits_unset_params() {
        let client = client();
        let lang: Option<String> = None;
        let call = client
            .method("artist.getInfo")
            .with_param("mbid", "a74b1b7f-71a5-4011-9441-d0b5e4122711")
            .with_param("lang", &lang)
            .with_param("username", "");

        assert_eq!(call.method(), "artist.getInfo");
        assert_eq!(call.params().len(), 1);
        assert_eq!(
            call.param("mbid"),
            Some("a74b1b7f-71a5-4011-9441-d0b5e4122711")
        );
        assert!(call.param("lang").is_none());
        assert!(call.param("username").is_none());
    }

    #[test]
    fn test_builder_is_order_insensitive() {
        let client = client();
        let first = client
            .method("artist.getTopTags")
            .with_param("artist", "Cher")
            .with_param("autocorrect", true);
        let second = client
            .method("artist.getTopTags")
            .with_param("autocorrect", true)
            .with_param("artist", "Cher");

        assert_eq!(first.params(), second.params());
    }

    #[test]
    fn test_builder_last_value_wins() {
        let client = client();
        let call = client
            .method("artist.getTopTags")
            .with_param("autocorrect", false)
            .with_param("autocorrect", true);

        assert_eq!(call.param("autocorrect"), Some("1"));
    }

    #[tokio::test]
    async fn test_try_execute_sends_method_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("method", "artist.getTopTags"))
            .and(query_param("api_key", "test_api_key"))
            .and(query_param("format", "json"))
            .and(query_param("artist", "Cher"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"toptags":{"tag":[{"name":"pop","count":100}]}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client =
            LastfmClient::with_config(LastfmConfig::with_url("test_api_key", server.uri()))
                .unwrap();
        let wrapper: TopTagsWrapper = client
            .method("artist.getTopTags")
            .with_param("artist", "Cher")
            .try_execute()
            .await
            .unwrap();

        assert_eq!(wrapper.toptags.tag[0].name, "pop");
    }

    #[tokio::test]
    #[traced_test]
    async fn test_execute_logs_and_returns_none_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client =
            LastfmClient::with_config(LastfmConfig::with_url("test_api_key", server.uri()))
                .unwrap();
        let result: Option<TopTagsWrapper> = client
            .method("artist.getTopTags")
            .with_param("artist", "Cher")
            .execute()
            .await;

        assert!(result.is_none());
        assert!(logs_contain("Last.fm call produced no result"));
    }
}
