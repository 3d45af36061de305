//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str =
    "warn,news_sniffer=info,sniffer_core=info,sniffer_assistant=info,sniffer_search=info";

/// Initialize tracing subscriber with default configuration
///
/// Honors `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`]. Log lines go to
/// stderr so stdout stays reserved for the assistant's response.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_LOG_FILTER);
}

/// Initialize tracing with an explicit fallback filter
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_tracing_with("debug");
        init_tracing();
    }
}
