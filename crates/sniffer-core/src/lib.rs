//! news-sniffer pipeline
//!
//! Fetch news for a topic, hand it to a hosted assistant and persist the
//! structured reply:
//!
//! 1. [`sniffer_search`] queries the search API
//! 2. [`sniffer_prompt`] renders the prompt
//! 3. [`sniffer_assistant`] runs the assistant and waits for its reply
//! 4. [`persist`] writes the reply as JSON, or as raw text if it is not JSON
//!
//! [`NewsSniffer`] wires the stages together from a [`SnifferConfig`].
//!
//! # Example
//!
//! ```no_run
//! use sniffer_core::{NewsSniffer, SnifferConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SnifferConfig::from_env()?;
//!     let sniffer = NewsSniffer::from_config(&config)?;
//!
//!     let report = sniffer.run("market volatility").await?;
//!     println!("saved to {}", report.written_to.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod persist;
pub mod pipeline;

pub use config::{
    AssistantConfig, CONFIG_PATH_ENV, Credentials, DEFAULT_CONFIG_FILE, SnifferConfig,
    SnifferConfigBuilder,
};
pub use error::{ConfigError, PersistError, Result, SnifferError};
pub use persist::{Persister, RAW_OUTPUT_FILE, STRUCTURED_OUTPUT_FILE, SnifferOutput};
pub use pipeline::{NewsSniffer, SnifferReport};
