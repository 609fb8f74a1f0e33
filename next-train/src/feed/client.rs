//! Realtime feed HTTP client.
//!
//! Fetches raw XML documents from the developer API. Authentication is a
//! query-string API key; responses are forced to XML with an `Accept` header.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;

use super::error::FeedError;
use super::request::{FeedRequest, FeedSource};

/// Default base URL for the realtime developer API.
const DEFAULT_BASE_URL: &str = "http://realtime.mbta.com/developer/api/v2";

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// API key passed as the `api_key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to the production v2 API)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Feed API client.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FeedClient {
    /// Create a new feed client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Full URL for a request, without the query string.
    pub fn url_for(&self, request: &FeedRequest) -> String {
        format!("{}/{}", self.base_url, request.endpoint())
    }
}

impl FeedSource for FeedClient {
    async fn fetch(&self, request: &FeedRequest) -> Result<String, FeedError> {
        let url = self.url_for(request);
        debug!(endpoint = request.endpoint(), params = ?request.params(), "Fetching feed");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(&request.params())
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FeedError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FeedError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteRef;

    #[test]
    fn config_builder() {
        let config = FeedConfig::new("test-key")
            .with_base_url("http://localhost:8080/api")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = FeedConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn url_joins_endpoint() {
        let config = FeedConfig::new("k").with_base_url("http://localhost:8080/api/");
        let client = FeedClient::new(config).unwrap();
        let request = FeedRequest::StopsByRoute {
            route: RouteRef::new("Orange"),
        };
        assert_eq!(
            client.url_for(&request),
            "http://localhost:8080/api/stopsbyroute"
        );
    }
}
