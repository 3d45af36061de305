//! Shared utilities for news-sniffer
//!
//! Logging setup shared by the `news-sniffer` binary and the integration tests.

pub mod logging;

pub use logging::{DEFAULT_LOG_FILTER, init_tracing, init_tracing_with};
