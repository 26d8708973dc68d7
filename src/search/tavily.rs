//! Tavily search client
//!
//! Uses Tavily's official search API.

use super::models::{SearchResult, TavilyRequest, TavilyResponse};
use super::traits::SearchClient;
use crate::config::SearchSettings;
use crate::error::UpstreamError;
use crate::network::HttpClient;
use crate::secrets::SecretStore;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Search client backed by api.tavily.com
pub struct TavilySearch {
    client: HttpClient,
    secrets: SecretStore,
    settings: SearchSettings,
}

impl TavilySearch {
    pub fn new(client: HttpClient, secrets: SecretStore, settings: SearchSettings) -> Self {
        Self {
            client,
            secrets,
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/search", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SearchClient for TavilySearch {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, UpstreamError> {
        if query.trim().is_empty() {
            return Err(UpstreamError::InvalidInput(
                "search query must not be empty".to_string(),
            ));
        }

        // Read on every call so a key replaced at runtime is used immediately
        let api_key = self.secrets.get(&self.settings.api_key_name)?;

        let body = TavilyRequest {
            api_key: &api_key,
            query,
            search_depth: &self.settings.search_depth,
            max_results: self.settings.max_results,
        };

        let response = self.client.post_json(&self.endpoint(), &body, None).await?;

        if !response.is_success() {
            warn!(
                "Tavily API error ({}): {}",
                response.status,
                response.excerpt()
            );
            return match response.status {
                401 | 403 => Err(UpstreamError::Auth),
                status => Err(UpstreamError::Transport(format!(
                    "Tavily API error: HTTP {}",
                    status
                ))),
            };
        }

        let decoded: TavilyResponse = response.json()?;
        debug!(
            "Tavily returned {} results for '{}'",
            decoded.results.len(),
            query
        );
        Ok(decoded.results)
    }
}
