//! Remote assistant service trait

use crate::Result;
use crate::types::{Run, Thread, ThreadMessage};
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Operations the runner needs from a hosted assistant service
///
/// [`crate::OpenAIAssistantClient`] implements this over HTTP; tests swap in
/// a mock to script run status transitions.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Create an empty conversation thread
    async fn create_thread(&self) -> Result<Thread>;

    /// Post `content` to a thread as a user message
    async fn create_message(&self, thread_id: &str, content: &str) -> Result<ThreadMessage>;

    /// Start a run of `assistant_id` on a thread
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;

    /// Fetch the current state of a run
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// List a thread's messages, newest first
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;
}
