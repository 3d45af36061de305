//! Google Custom Search JSON API client
//!
//! See: https://developers.google.com/custom-search/v1/reference/rest/v1/cse/list

use crate::error::{Result, SearchError};
use crate::types::{SearchResponse, SearchResultItem};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default Custom Search endpoint
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Default number of results requested per search
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Upper bound the API accepts for `num`
const API_MAX_RESULTS: usize = 10;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the search client
#[derive(Clone)]
pub struct SearchConfig {
    /// API key (`key` query parameter)
    pub api_key: String,

    /// Programmable Search Engine id (`cx` query parameter)
    pub engine_id: String,

    /// Endpoint URL, overridable for tests and proxies
    pub endpoint: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl SearchConfig {
    /// Create a new config with the given credentials and default settings
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

// Keep the API key out of debug output.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("api_key", &"<redacted>")
            .field("engine_id", &self.engine_id)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Client for the Custom Search API
pub struct GoogleSearchClient {
    client: Client,
    config: SearchConfig,
}

impl GoogleSearchClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: SearchConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SearchError::Configuration(
                "search API key is empty".to_string(),
            ));
        }
        if config.engine_id.trim().is_empty() {
            return Err(SearchError::Configuration(
                "search engine id is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new client with credentials and default settings
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Result<Self> {
        Self::with_config(SearchConfig::new(api_key, engine_id))
    }

    /// Get the current configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for `query`, returning at most `max_results` items in API order
    ///
    /// A response without an `items` array is an empty result, not an error.
    /// A non-success status is returned as [`SearchError::Api`] without retry.
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResultItem>> {
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let num = max_results.min(API_MAX_RESULTS).to_string();
        debug!("Requesting {} results", num);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        let mut items = body.items.unwrap_or_default();
        items.truncate(max_results);

        debug!("Search returned {} items", items.len());
        Ok(items)
    }
}

/// Pull `error.message` out of a Google API error body, falling back to the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GoogleSearchClient {
        let config = SearchConfig::new("test-key", "test-cx")
            .with_endpoint(format!("{}/customsearch/v1", server.uri()));
        GoogleSearchClient::with_config(config).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = GoogleSearchClient::new("key", "cx").unwrap();
        assert_eq!(client.config().endpoint, DEFAULT_SEARCH_ENDPOINT);
        assert_eq!(client.config().timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(matches!(
            GoogleSearchClient::new("", "cx"),
            Err(SearchError::Configuration(_))
        ));
        assert!(matches!(
            GoogleSearchClient::new("key", "  "),
            Err(SearchError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = SearchConfig::new("super-secret", "cx");
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_search_sends_parameters_and_preserves_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("key", "test-key"))
            .and(query_param("cx", "test-cx"))
            .and(query_param("q", "market volatility"))
            .and(query_param("num", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "customsearch#search",
                "items": [
                    {"title": "VIX spikes", "link": "https://a.example/vix", "snippet": "Volatility rose."},
                    {"title": "Fed holds", "link": "https://b.example/fed"},
                    {"snippet": "Credit spreads widen."}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server)
            .search("market volatility", DEFAULT_MAX_RESULTS)
            .await
            .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title.as_deref(), Some("VIX spikes"));
        assert_eq!(items[1].title.as_deref(), Some("Fed holds"));
        assert!(items[1].snippet.is_none());
        assert!(items[2].title.is_none());
        assert_eq!(items[2].snippet.as_deref(), Some("Credit spreads widen."));
    }

    #[tokio::test]
    async fn test_search_without_items_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "searchInformation": {"totalResults": "0"}
            })))
            .mount(&server)
            .await;

        let items = client_for(&server).search("nothing here", 10).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_search_truncates_to_max_results() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("num", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "one"},
                    {"title": "two"},
                    {"title": "three"}
                ]
            })))
            .mount(&server)
            .await;

        let items = client_for(&server).search("rates", 2).await.unwrap();
        let titles: Vec<_> = items.iter().filter_map(|i| i.title.as_deref()).collect();
        assert_eq!(titles, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_num_is_capped_at_api_limit() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("num", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server).search("credit", 25).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "Daily limit exceeded"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).search("anything", 10).await.unwrap_err();
        match err {
            SearchError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Daily limit exceeded");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_message_falls_back_to_body() {
        assert_eq!(api_error_message("plain failure"), "plain failure");
        assert_eq!(
            api_error_message(r#"{"error": {"message": "bad cx"}}"#),
            "bad cx"
        );
    }

    #[tokio::test]
    async fn test_zero_results_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let items = client_for(&server).search("anything", 0).await.unwrap();
        assert!(items.is_empty());
    }
}
