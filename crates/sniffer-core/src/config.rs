//! Process configuration
//!
//! Built once at startup and passed by reference into each stage. Secrets come
//! from the environment (optionally via a `.env` file); the assistant identity
//! comes from a JSON config file.

use crate::error::ConfigError;
use serde::Deserialize;
use sniffer_assistant::{DEFAULT_OPENAI_API_BASE, PollPolicy};
use sniffer_search::{DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_ENDPOINT};
use std::path::{Path, PathBuf};
use url::Url;

type Result<T> = std::result::Result<T, ConfigError>;

/// Default assistant config file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "news_sniffer_config.json";

/// Environment variable that overrides [`DEFAULT_CONFIG_FILE`]
pub const CONFIG_PATH_ENV: &str = "NEWS_SNIFFER_CONFIG";

const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";
const GOOGLE_CSE_ID_ENV: &str = "GOOGLE_CSE_ID";
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
const OPENAI_API_BASE_ENV: &str = "OPENAI_API_BASE";
const SEARCH_ENDPOINT_ENV: &str = "GOOGLE_CSE_ENDPOINT";

/// The Custom Search API rejects `num` above this
const MAX_RESULTS_LIMIT: usize = 10;

/// API credentials
#[derive(Clone, Default)]
pub struct Credentials {
    pub google_api_key: String,
    pub google_cse_id: String,
    pub openai_api_key: String,
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`; unset and blank values are errors
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
        };

        Ok(Self {
            google_api_key: require(GOOGLE_API_KEY_ENV)?,
            google_cse_id: require(GOOGLE_CSE_ID_ENV)?,
            openai_api_key: require(OPENAI_API_KEY_ENV)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("google_api_key", &"<redacted>")
            .field("google_cse_id", &self.google_cse_id)
            .field("openai_api_key", &"<redacted>")
            .finish()
    }
}

/// Stored identity of the preconfigured assistant
///
/// The file usually holds the whole assistant object as returned by the
/// service; only `id` is required and unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssistantConfig {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl AssistantConfig {
    /// Config for a bare assistant id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            model: None,
        }
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self =
            serde_json::from_str(&raw).map_err(|source| ConfigError::InvalidFile {
                path: path.to_path_buf(),
                source,
            })?;

        if config.id.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "assistant id in {} is empty",
                path.display()
            )));
        }

        Ok(config)
    }
}

/// Full process configuration
#[derive(Debug, Clone)]
pub struct SnifferConfig {
    /// API credentials
    pub credentials: Credentials,

    /// Assistant to run
    pub assistant: AssistantConfig,

    /// Search results requested per run (1..=10)
    pub max_results: usize,

    /// Directory the output file is written to
    pub output_dir: PathBuf,

    /// How long to wait on the assistant run
    pub poll: PollPolicy,

    /// Assistants API base URL
    pub openai_api_base: String,

    /// Custom Search endpoint URL
    pub search_endpoint: String,
}

impl SnifferConfig {
    /// Create a new configuration builder
    pub fn builder() -> SnifferConfigBuilder {
        SnifferConfigBuilder::default()
    }

    /// Load configuration from `.env`, the environment and the config file
    ///
    /// The config file is `$NEWS_SNIFFER_CONFIG` or
    /// `news_sniffer_config.json` in the working directory.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal.
        dotenvy::dotenv().ok();

        let credentials = Credentials::from_env()?;

        let config_path = std::env::var(CONFIG_PATH_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        let assistant = AssistantConfig::from_file(&config_path)?;

        let mut builder = Self::builder().credentials(credentials).assistant(assistant);
        if let Ok(base) = std::env::var(OPENAI_API_BASE_ENV) {
            builder = builder.openai_api_base(base);
        }
        if let Ok(endpoint) = std::env::var(SEARCH_ENDPOINT_ENV) {
            builder = builder.search_endpoint(endpoint);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.credentials.google_api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnv(GOOGLE_API_KEY_ENV.to_string()));
        }
        if self.credentials.google_cse_id.trim().is_empty() {
            return Err(ConfigError::MissingEnv(GOOGLE_CSE_ID_ENV.to_string()));
        }
        if self.credentials.openai_api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnv(OPENAI_API_KEY_ENV.to_string()));
        }

        if self.assistant.id.trim().is_empty() {
            return Err(ConfigError::Invalid("assistant id is empty".to_string()));
        }

        if !(1..=MAX_RESULTS_LIMIT).contains(&self.max_results) {
            return Err(ConfigError::Invalid(format!(
                "max_results must be between 1 and {MAX_RESULTS_LIMIT}, got {}",
                self.max_results
            )));
        }

        if self.poll.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "poll max_attempts must be greater than 0".to_string(),
            ));
        }

        check_url("openai_api_base", &self.openai_api_base)?;
        check_url("search_endpoint", &self.search_endpoint)?;

        Ok(())
    }
}

fn check_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::Invalid(format!("{name} '{value}' is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid(format!(
            "{name} must use http or https, got '{other}'"
        ))),
    }
}

/// Builder for SnifferConfig
#[derive(Debug, Default)]
pub struct SnifferConfigBuilder {
    credentials: Option<Credentials>,
    assistant: Option<AssistantConfig>,
    max_results: Option<usize>,
    output_dir: Option<PathBuf>,
    poll: Option<PollPolicy>,
    openai_api_base: Option<String>,
    search_endpoint: Option<String>,
}

impl SnifferConfigBuilder {
    /// Set API credentials
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the assistant
    pub fn assistant(mut self, assistant: AssistantConfig) -> Self {
        self.assistant = Some(assistant);
        self
    }

    /// Set the number of search results
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the poll policy
    pub fn poll(mut self, poll: PollPolicy) -> Self {
        self.poll = Some(poll);
        self
    }

    /// Set the Assistants API base URL
    pub fn openai_api_base(mut self, base: impl Into<String>) -> Self {
        self.openai_api_base = Some(base.into());
        self
    }

    /// Set the Custom Search endpoint
    pub fn search_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.search_endpoint = Some(endpoint.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SnifferConfig> {
        let config = SnifferConfig {
            credentials: self.credentials.unwrap_or_default(),
            assistant: self
                .assistant
                .ok_or_else(|| ConfigError::Invalid("assistant is required".to_string()))?,
            max_results: self.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            poll: self.poll.unwrap_or_default(),
            openai_api_base: self
                .openai_api_base
                .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string()),
            search_endpoint: self
                .search_endpoint
                .unwrap_or_else(|| DEFAULT_SEARCH_ENDPOINT.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
