//! Search result types

use serde::{Deserialize, Serialize};

/// A single search hit, kept in the order the service returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Snippet extracted by the search service
    #[serde(default)]
    pub content: String,
}

impl SearchResult {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Request body of the Tavily search endpoint
#[derive(Debug, Serialize)]
pub(crate) struct TavilyRequest<'a> {
    pub api_key: &'a str,
    pub query: &'a str,
    pub search_depth: &'a str,
    pub max_results: u32,
}

/// Response body of the Tavily search endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct TavilyResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}
