//! Structured output requested from the assistant
//!
//! The assistant is asked for a JSON list of [`NewsEntry`] objects. Nothing
//! forces it to comply, so persistence keeps the raw parsed JSON; these types
//! only give callers a typed view when the reply does match.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Field names every entry is asked to carry, in prompt order
pub const NEWS_ENTRY_FIELDS: [&str; 7] = [
    "headline",
    "source",
    "url",
    "timestamp",
    "summary",
    "category",
    "sentiment",
];

/// Example category tags named in the prompt
pub const CATEGORY_TAXONOMY: [&str; 4] = [
    "Rates & Curve",
    "Credit & Volatility",
    "Macro Indicators",
    "Flight to Safety",
];

/// Market signal attached to each entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "Risk-On")]
    RiskOn,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Risk-Off")]
    RiskOff,
}

impl Sentiment {
    /// All variants in prompt order
    pub const ALL: [Sentiment; 3] = [Sentiment::RiskOn, Sentiment::Neutral, Sentiment::RiskOff];

    /// Wire label, e.g. `"Risk-On"`
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::RiskOn => "Risk-On",
            Sentiment::Neutral => "Neutral",
            Sentiment::RiskOff => "Risk-Off",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sentiment label outside `Risk-On | Neutral | Risk-Off`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sentiment label: {0}")]
pub struct UnknownSentiment(pub String);

impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownSentiment(s.to_string()))
    }
}

/// One structured news item as requested in the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEntry {
    pub headline: String,
    pub source: String,
    pub url: String,
    /// Publication time; free-form because the assistant may omit seconds or zone
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub summary: Vec<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub category: Vec<String>,
    pub sentiment: Sentiment,
}

impl NewsEntry {
    /// Try to read a parsed assistant reply as a list of entries
    ///
    /// Returns `None` when the value does not match the requested shape.
    pub fn list_from_value(value: &serde_json::Value) -> Option<Vec<NewsEntry>> {
        serde_json::from_value(value.clone()).ok()
    }
}

// The assistant sometimes answers a single string where a list was asked for.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}
