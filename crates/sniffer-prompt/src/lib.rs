//! Prompt construction for news-sniffer
//!
//! Turns a topic and its search results into the text prompt handed to the
//! hosted assistant, and describes the structured output the assistant is
//! asked to return.
//!
//! # Example
//!
//! ```
//! use sniffer_prompt::build_news_prompt;
//! use sniffer_search::SearchResultItem;
//!
//! let items = vec![SearchResultItem::new(
//!     "Treasury yields jump",
//!     "https://example.com/yields",
//!     "The 10-year yield rose 15bp.",
//! )];
//!
//! let prompt = build_news_prompt("bond market", &items);
//! assert!(prompt.starts_with("Topic: bond market\n"));
//! assert!(prompt.contains("1. Treasury yields jump\n"));
//! ```

pub mod builder;
pub mod news;
pub mod schema;

pub use builder::PromptBuilder;
pub use news::{MISSING_FIELD, NEWS_SNIFFER_INSTRUCTIONS, build_news_prompt};
pub use schema::{CATEGORY_TAXONOMY, NEWS_ENTRY_FIELDS, NewsEntry, Sentiment, UnknownSentiment};
