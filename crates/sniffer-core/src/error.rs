//! Error types for the news-sniffer pipeline

use sniffer_assistant::AssistantError;
use sniffer_search::SearchError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, SnifferError>;

/// Startup configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is unset or empty
    #[error("Environment variable {0} is not set")]
    MissingEnv(String),

    /// Config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON or lacks required keys
    #[error("Invalid config file {}: {source}", path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failure writing the output file
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Any pipeline failure
#[derive(Debug, Error)]
pub enum SnifferError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Assistant failed: {0}")]
    Assistant(#[from] AssistantError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::MissingEnv("GOOGLE_API_KEY".to_string());
        assert_eq!(err.to_string(), "Environment variable GOOGLE_API_KEY is not set");

        let err: SnifferError = SearchError::Api {
            status: 500,
            message: "backend".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Search failed: Search API error (status 500): backend"
        );
    }

    #[test]
    fn test_assistant_error_conversion() {
        let err: SnifferError = AssistantError::RunExpired {
            run_id: "run_9".to_string(),
        }
        .into();
        assert!(matches!(err, SnifferError::Assistant(_)));
        assert!(err.to_string().contains("run_9"));
    }
}
