//! Search result types

use serde::{Deserialize, Serialize};

/// One search hit
///
/// The API does not guarantee any of the three fields, so each is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Result title
    #[serde(default)]
    pub title: Option<String>,
    /// Result URL
    #[serde(default)]
    pub link: Option<String>,
    /// Short text excerpt
    #[serde(default)]
    pub snippet: Option<String>,
}

impl SearchResultItem {
    /// Create an item with all three fields populated
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
            snippet: Some(snippet.into()),
        }
    }
}

/// Raw Custom Search response; only the fields we read
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Option<Vec<SearchResultItem>>,
}
