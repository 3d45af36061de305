//! Assistant run orchestration

use crate::api::AssistantApi;
use crate::error::{AssistantError, Result};
use crate::poll::PollPolicy;
use crate::types::{MessageRole, Run, RunStatus, ThreadMessage};
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Drives one assistant execution from prompt to reply
pub struct AssistantRunner {
    api: Arc<dyn AssistantApi>,
    assistant_id: String,
    poll: PollPolicy,
}

impl AssistantRunner {
    /// Create a runner for `assistant_id` with the default poll policy
    pub fn new(api: Arc<dyn AssistantApi>, assistant_id: impl Into<String>) -> Self {
        Self {
            api,
            assistant_id: assistant_id.into(),
            poll: PollPolicy::default(),
        }
    }

    /// Replace the poll policy
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// The assistant this runner invokes
    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    /// Post `prompt` on a fresh thread, run the assistant and return its reply
    ///
    /// The reply is the text of the newest assistant message, trimmed. Remote
    /// errors abort immediately; a run that ends in any state other than
    /// `completed` yields the matching [`AssistantError`] variant.
    #[instrument(skip(self, prompt), fields(assistant_id = %self.assistant_id))]
    pub async fn run(&self, prompt: &str) -> Result<String> {
        let thread = self.api.create_thread().await?;
        self.api.create_message(&thread.id, prompt).await?;

        let run = self.api.create_run(&thread.id, &self.assistant_id).await?;
        info!(thread_id = %thread.id, run_id = %run.id, "Assistant run started");

        let run = self.wait_for_run(&thread.id, &run.id).await?;
        info!(run_id = %run.id, "Assistant run completed");

        self.latest_reply(&thread.id, &run.id).await
    }

    /// Poll a run until it is terminal, mapping non-success endings to errors
    async fn wait_for_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        for attempt in 0..self.poll.max_attempts {
            let delay = self.poll.delay_before(attempt);
            if !delay.is_zero() {
                sleep(delay).await;
            }

            let run = self.api.retrieve_run(thread_id, run_id).await?;
            debug!(
                run_id,
                status = %run.status,
                "Run status check {}/{}",
                attempt + 1,
                self.poll.max_attempts
            );

            if run.status.is_terminal() {
                return settle(run);
            }
            if run.status == RunStatus::Unknown {
                warn!(run_id, "Run reported an unrecognized status; still waiting");
            }
        }

        warn!(
            run_id,
            "Run still active after {} status checks (~{:?})",
            self.poll.max_attempts,
            self.poll.max_total_wait()
        );
        Err(AssistantError::PollTimeout {
            run_id: run_id.to_string(),
            attempts: self.poll.max_attempts,
        })
    }

    /// Newest assistant text on the thread, preferring messages from `run_id`
    async fn latest_reply(&self, thread_id: &str, run_id: &str) -> Result<String> {
        let messages = self.api.list_messages(thread_id).await?;

        pick_reply(&messages, run_id).ok_or_else(|| AssistantError::NoAssistantMessage {
            thread_id: thread_id.to_string(),
        })
    }
}

/// Map a terminal run to its outcome; only `completed` is a success
fn settle(run: Run) -> Result<Run> {
    match run.status {
        RunStatus::Failed => {
            let reason = run
                .last_error
                .as_ref()
                .map_or_else(|| "no error details".to_string(), ToString::to_string);
            Err(AssistantError::RunFailed {
                run_id: run.id,
                reason,
            })
        }
        RunStatus::Cancelled => Err(AssistantError::RunCancelled { run_id: run.id }),
        RunStatus::Expired => Err(AssistantError::RunExpired { run_id: run.id }),
        RunStatus::Incomplete => {
            let reason = run
                .incomplete_details
                .and_then(|d| d.reason)
                .unwrap_or_else(|| "unspecified".to_string());
            Err(AssistantError::RunIncomplete {
                run_id: run.id,
                reason,
            })
        }
        RunStatus::RequiresAction => Err(AssistantError::RequiresAction { run_id: run.id }),
        _ => Ok(run),
    }
}

fn pick_reply(messages: &[ThreadMessage], run_id: &str) -> Option<String> {
    let replies: Vec<(&ThreadMessage, String)> = messages
        .iter()
        .filter(|m| m.role == MessageRole::Assistant)
        .filter_map(|m| m.text().map(|text| (m, text)))
        .collect();

    replies
        .iter()
        .find(|(m, _)| m.run_id.as_deref() == Some(run_id))
        .or_else(|| replies.first())
        .map(|(_, text)| text.trim().to_string())
}
