//! OpenAI Assistants API client
//!
//! Implements [`AssistantApi`] over the v2 Assistants endpoints.
//! See: https://platform.openai.com/docs/api-reference/assistants
//!
//! # Example
//!
//! ```no_run
//! use sniffer_assistant::{AssistantApi, AssistantClientConfig, OpenAIAssistantClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AssistantClientConfig::new("sk-...")
//!         .with_api_base("https://api.openai.com/v1")
//!         .with_timeout(60);
//!
//!     let client = OpenAIAssistantClient::with_config(config)?;
//!     let thread = client.create_thread().await?;
//!     println!("thread: {}", thread.id);
//!     Ok(())
//! }
//! ```

use crate::api::AssistantApi;
use crate::error::{AssistantError, Result};
use crate::types::{ListResponse, Run, Thread, ThreadMessage};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default base URL for the OpenAI API
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const ASSISTANTS_BETA_HEADER: &str = "assistants=v2";
const MESSAGE_PAGE_SIZE: &str = "20";

/// Configuration for the Assistants client
#[derive(Clone)]
pub struct AssistantClientConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL (default: "https://api.openai.com/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 60)
    pub timeout_secs: u64,
}

impl AssistantClientConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY` and, when set, the base URL
    /// from `OPENAI_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AssistantError::Configuration("OPENAI_API_KEY environment variable not set".to_string())
        })?;

        let api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string());

        Ok(Self::new(api_key).with_api_base(api_base))
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl std::fmt::Debug for AssistantClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// HTTP client for the Assistants API
pub struct OpenAIAssistantClient {
    client: Client,
    config: AssistantClientConfig,
}

impl OpenAIAssistantClient {
    /// Create a client with custom configuration
    pub fn with_config(config: AssistantClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "assistant API key is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(AssistantClientConfig::new(api_key))
    }

    /// Create a client from `OPENAI_API_KEY` / `OPENAI_API_BASE`
    pub fn from_env() -> Result<Self> {
        Self::with_config(AssistantClientConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &AssistantClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.config.api_key)
            .header("OpenAI-Beta", ASSISTANTS_BETA_HEADER)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .authorized(self.client.get(self.url(path)))
            .query(query)
            .send()
            .await?;
        parse_response(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authorized(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }
}

#[async_trait]
impl AssistantApi for OpenAIAssistantClient {
    #[instrument(skip(self))]
    async fn create_thread(&self) -> Result<Thread> {
        let thread: Thread = self.post("/threads", &serde_json::json!({})).await?;
        debug!(thread_id = %thread.id, "Thread created");
        Ok(thread)
    }

    #[instrument(skip(self, content), fields(content_len = content.len()))]
    async fn create_message(&self, thread_id: &str, content: &str) -> Result<ThreadMessage> {
        let body = CreateMessageRequest {
            role: "user",
            content,
        };
        self.post(&format!("/threads/{thread_id}/messages"), &body)
            .await
    }

    #[instrument(skip(self))]
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run> {
        let body = CreateRunRequest { assistant_id };
        let run: Run = self
            .post(&format!("/threads/{thread_id}/runs"), &body)
            .await?;
        debug!(run_id = %run.id, status = %run.status, "Run created");
        Ok(run)
    }

    #[instrument(skip(self))]
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get(&format!("/threads/{thread_id}/runs/{run_id}"), &[])
            .await
    }

    #[instrument(skip(self))]
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let page: ListResponse<ThreadMessage> = self
            .get(
                &format!("/threads/{thread_id}/messages"),
                &[("order", "desc"), ("limit", MESSAGE_PAGE_SIZE)],
            )
            .await?;
        Ok(page.data)
    }
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

// ============================================================================
// Response handling
// ============================================================================

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = api_error_message(&body);

        return Err(match status.as_u16() {
            401 => AssistantError::Authentication,
            429 => AssistantError::RateLimited(message),
            code => AssistantError::Api {
                status: code,
                message,
            },
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AssistantError::UnexpectedResponse(format!("Failed to parse response: {e}")))
}

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
    use crate::types::{MessageRole, RunStatus};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenAIAssistantClient {
        let config = AssistantClientConfig::new("test-key").with_api_base(server.uri());
        OpenAIAssistantClient::with_config(config).unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = AssistantClientConfig::new("k");
        assert_eq!(config.api_base, DEFAULT_OPENAI_API_BASE);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let config = config.with_api_base("http://localhost:8080/v1/");
        assert_eq!(config.api_base, "http://localhost:8080/v1");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            OpenAIAssistantClient::new(" "),
            Err(AssistantError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let printed = format!("{:?}", AssistantClientConfig::new("sk-secret"));
        assert!(!printed.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_create_thread_sends_headers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/threads"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("openai-beta", "assistants=v2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "thread_abc", "object": "thread"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let thread = client_for(&server).create_thread().await.unwrap();
        assert_eq!(thread.id, "thread_abc");
    }

    #[tokio::test]
    async fn test_create_message_and_run() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/threads/thread_abc/messages"))
            .and(body_json(json!({"role": "user", "content": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "role": "user",
                "content": [{"type": "text", "text": {"value": "hello", "annotations": []}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/threads/thread_abc/runs"))
            .and(body_json(json!({"assistant_id": "asst_1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "run_1",
                "thread_id": "thread_abc",
                "assistant_id": "asst_1",
                "status": "queued"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let message = client.create_message("thread_abc", "hello").await.unwrap();
        assert_eq!(message.role, MessageRole::User);

        let run = client.create_run("thread_abc", "asst_1").await.unwrap();
        assert_eq!(run.id, "run_1");
        assert_eq!(run.status, RunStatus::Queued);
    }

    #[tokio::test]
    async fn test_list_messages_newest_first() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/threads/thread_abc/messages"))
            .and(query_param("order", "desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "object": "list",
                "data": [
                    {"id": "msg_2", "role": "assistant", "run_id": "run_1",
                     "content": [{"type": "text", "text": {"value": "reply", "annotations": []}}]},
                    {"id": "msg_1", "role": "user",
                     "content": [{"type": "text", "text": {"value": "prompt", "annotations": []}}]}
                ],
                "has_more": false
            })))
            .mount(&server)
            .await;

        let messages = client_for(&server).list_messages("thread_abc").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text().as_deref(), Some("reply"));
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/threads/t/runs/unauthorized"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/threads/t/runs/limited"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Too many requests"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/threads/t/runs/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"message": "No run found with id 'missing'."}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);

        assert!(matches!(
            client.retrieve_run("t", "unauthorized").await,
            Err(AssistantError::Authentication)
        ));
        match client.retrieve_run("t", "limited").await {
            Err(AssistantError::RateLimited(msg)) => assert_eq!(msg, "Too many requests"),
            other => panic!("Expected RateLimited, got {other:?}"),
        }
        match client.retrieve_run("t", "missing").await {
            Err(AssistantError::Api { status, message }) => {
                assert_eq!(status, 404);
                assert!(message.contains("No run found"));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        assert!(matches!(
            client_for(&server).create_thread().await,
            Err(AssistantError::UnexpectedResponse(_))
        ));
    }
}
