//! Search client capability

use super::models::SearchResult;
use crate::error::UpstreamError;
use async_trait::async_trait;

/// Anything that can turn a free-text query into an ordered list of results
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Client name, used in logs
    fn name(&self) -> &str;

    /// Run a query. Results keep the order the backend returned them in.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, UpstreamError>;
}
