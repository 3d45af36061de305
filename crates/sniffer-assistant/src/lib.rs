//! Hosted assistant runner for news-sniffer
//!
//! Drives one execution of a preconfigured assistant: create a thread, post
//! the prompt, start a run, poll it to a terminal state and read back the
//! assistant's reply.
//!
//! - [`AssistantApi`] is the seam over the remote service
//! - [`OpenAIAssistantClient`] implements it against the Assistants HTTP API
//! - [`PollPolicy`] bounds how long a run is waited on
//! - [`AssistantRunner`] ties the steps together
//!
//! # Example
//!
//! ```no_run
//! use sniffer_assistant::{AssistantRunner, OpenAIAssistantClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAIAssistantClient::from_env()?;
//!     let runner = AssistantRunner::new(Arc::new(client), "asst_123");
//!
//!     let reply = runner.run("Summarize today's credit news.").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod poll;
pub mod runner;
pub mod types;

pub use api::AssistantApi;
pub use client::{AssistantClientConfig, DEFAULT_OPENAI_API_BASE, OpenAIAssistantClient};
pub use error::{AssistantError, Result};
pub use poll::PollPolicy;
pub use runner::AssistantRunner;
pub use types::{MessageContent, MessageRole, Run, RunError, RunStatus, Thread, ThreadMessage};
