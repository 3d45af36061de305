//! News-scanning prompt
//!
//! Renders a topic and its search results into the prompt sent to the
//! assistant. The output is a pure function of its inputs.

use crate::builder::PromptBuilder;
use sniffer_search::SearchResultItem;

/// Placeholder rendered for a missing title, link or snippet
pub const MISSING_FIELD: &str = "N/A";

/// Fixed instruction block appended to every prompt
///
/// Names the output fields (see [`crate::NEWS_ENTRY_FIELDS`]) and the
/// sentiment labels (see [`crate::Sentiment`]) the assistant must use.
pub const NEWS_SNIFFER_INSTRUCTIONS: &str = "Activate your macro-financial news scanning capabilities. \
Your task is to identify and summarize the most important recent developments across global markets, \
monetary policy, credit conditions, volatility, and systemic risk. Focus on news that could materially shift the market\u{2019}s risk environment. \
Return a list of structured JSON objects with the following fields:\n\n\
- headline: Title of the article or news item\n\
- source: Publisher or analyst name\n\
- url: Direct link to the article\n\
- timestamp: Date and time of publication (if available, UTC preferred)\n\
- summary: 1\u{2013}3 concise bullet points explaining the significance\n\
- category: One or more tags relevant to Bottom Sniffer components (e.g., 'Rates & Curve', 'Credit & Volatility', 'Macro Indicators', 'Flight to Safety')\n\
- sentiment: Market signal ('Risk-On', 'Neutral', or 'Risk-Off') based on the article's implications\n\n\
Only return content that impacts the risk assessment framework, market stress indicators, or trading posture. \
Filter out low-signal items and focus on actionable macro and systemic developments.";

const HEADLINES_INTRO: &str = "Here are the most relevant news headlines from today:";

/// Build the prompt for `topic` from `results`, numbering items from 1
///
/// Layout:
///
/// ```text
/// Topic: <topic>
///
/// Here are the most relevant news headlines from today:
///
/// 1. <title>
/// URL: <link>
/// Summary: <snippet>
///
/// ...
///
/// <instructions>
/// ```
pub fn build_news_prompt(topic: &str, results: &[SearchResultItem]) -> String {
    PromptBuilder::new()
        .line(format!("Topic: {topic}"))
        .newline()
        .line(HEADLINES_INTRO)
        .newline()
        .each(results.iter().enumerate(), |builder, (i, item)| {
            builder
                .numbered(i + 1, or_missing(item.title.as_deref()))
                .field("URL", or_missing(item.link.as_deref()))
                .field("Summary", or_missing(item.snippet.as_deref()))
                .newline()
        })
        .newline()
        .text(NEWS_SNIFFER_INSTRUCTIONS)
        .build()
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING_FIELD)
}
