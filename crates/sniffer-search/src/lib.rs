//! Web search client for news-sniffer
//!
//! Wraps the Google Custom Search JSON API. A search returns an ordered,
//! bounded list of [`SearchResultItem`]s; the order is the API's relevance
//! order and is preserved as-is.

pub mod client;
pub mod error;
pub mod types;

pub use client::{DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_ENDPOINT, GoogleSearchClient, SearchConfig};
pub use error::{Result, SearchError};
pub use types::SearchResultItem;
