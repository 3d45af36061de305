//! Error types for assistant operations

use thiserror::Error;

/// Result type for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Errors that can occur while driving an assistant run
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Network or HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    Authentication,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Any other non-success status
    #[error("Assistant API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Run ended in `failed`
    #[error("Run {run_id} failed: {reason}")]
    RunFailed { run_id: String, reason: String },

    /// Run ended in `cancelled`
    #[error("Run {run_id} was cancelled")]
    RunCancelled { run_id: String },

    /// Run ended in `expired`
    #[error("Run {run_id} expired before completing")]
    RunExpired { run_id: String },

    /// Run ended in `incomplete`
    #[error("Run {run_id} ended incomplete: {reason}")]
    RunIncomplete { run_id: String, reason: String },

    /// Run is waiting for tool outputs, which this runner never supplies
    #[error("Run {run_id} requires tool outputs, which are not supported")]
    RequiresAction { run_id: String },

    /// Poll budget exhausted while the run was still active
    #[error("Run {run_id} did not finish after {attempts} status checks")]
    PollTimeout { run_id: String, attempts: u32 },

    /// Run completed but the thread holds no assistant text
    #[error("No assistant reply found in thread {thread_id}")]
    NoAssistantMessage { thread_id: String },
}
