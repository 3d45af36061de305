//! Search → prompt → assistant → persist

use crate::config::SnifferConfig;
use crate::error::Result;
use crate::persist::{Persister, SnifferOutput};
use sniffer_assistant::{AssistantClientConfig, AssistantRunner, OpenAIAssistantClient};
use sniffer_prompt::build_news_prompt;
use sniffer_search::{GoogleSearchClient, SearchConfig, SearchResultItem};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

/// What one pipeline run produced
#[derive(Debug, Clone)]
pub struct SnifferReport {
    /// Topic searched for
    pub topic: String,
    /// Number of search results passed to the assistant
    pub article_count: usize,
    /// Assistant reply, trimmed
    pub response: String,
    /// Parsed or raw classification of the reply
    pub output: SnifferOutput,
    /// File the reply was saved to
    pub written_to: PathBuf,
}

/// The end-to-end news pipeline
pub struct NewsSniffer {
    search: GoogleSearchClient,
    runner: AssistantRunner,
    persister: Persister,
    max_results: usize,
}

impl NewsSniffer {
    /// Assemble the pipeline from its stages
    pub fn new(
        search: GoogleSearchClient,
        runner: AssistantRunner,
        persister: Persister,
        max_results: usize,
    ) -> Self {
        Self {
            search,
            runner,
            persister,
            max_results,
        }
    }

    /// Build HTTP clients and stages from configuration
    pub fn from_config(config: &SnifferConfig) -> Result<Self> {
        let search = GoogleSearchClient::with_config(
            SearchConfig::new(
                &config.credentials.google_api_key,
                &config.credentials.google_cse_id,
            )
            .with_endpoint(&config.search_endpoint),
        )?;

        let assistant_client = OpenAIAssistantClient::with_config(
            AssistantClientConfig::new(&config.credentials.openai_api_key)
                .with_api_base(&config.openai_api_base),
        )?;

        let runner = AssistantRunner::new(Arc::new(assistant_client), &config.assistant.id)
            .with_poll_policy(config.poll.clone());

        Ok(Self::new(
            search,
            runner,
            Persister::new(&config.output_dir),
            config.max_results,
        ))
    }

    /// Stage 1: search for `topic`
    pub async fn fetch(&self, topic: &str) -> Result<Vec<SearchResultItem>> {
        Ok(self.search.search(topic, self.max_results).await?)
    }

    /// Stage 3: run the assistant on `prompt` and return its reply
    pub async fn ask(&self, prompt: &str) -> Result<String> {
        Ok(self.runner.run(prompt).await?)
    }

    /// Stage 4: classify and save a reply
    pub async fn persist(&self, response: &str) -> Result<(SnifferOutput, PathBuf)> {
        let output = SnifferOutput::from_response(response);
        let path = self.persister.persist(&output).await?;
        Ok((output, path))
    }

    /// Run every stage for `topic`
    ///
    /// Search and assistant failures abort the run. A reply that is not JSON
    /// is not a failure; it is saved as raw text.
    pub async fn run(&self, topic: &str) -> Result<SnifferReport> {
        self.run_with_progress(topic, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_articles` with the search result
    /// count before the assistant is invoked
    #[instrument(skip(self, on_articles))]
    pub async fn run_with_progress<F>(&self, topic: &str, on_articles: F) -> Result<SnifferReport>
    where
        F: FnOnce(usize) + Send,
    {
        info!("Searching for news");
        let items = self.fetch(topic).await?;
        info!(articles = items.len(), "Passing results to the assistant");
        on_articles(items.len());

        let prompt = build_news_prompt(topic, &items);
        let response = self.ask(&prompt).await?;

        let (output, written_to) = self.persist(&response).await?;

        Ok(SnifferReport {
            topic: topic.to_string(),
            article_count: items.len(),
            response,
            output,
            written_to,
        })
    }
}
