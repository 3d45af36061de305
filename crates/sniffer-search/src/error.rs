//! Error types for search operations

use thiserror::Error;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while querying the search API
#[derive(Error, Debug)]
pub enum SearchError {
    /// The API answered with a non-success status
    #[error("Search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network or HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape
    #[error("Unexpected search response: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::Api {
            status: 403,
            message: "quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Search API error (status 403): quota exceeded"
        );
    }
}
