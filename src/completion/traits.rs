//! Completion client capability

use super::models::CompletionRequest;
use crate::error::UpstreamError;
use async_trait::async_trait;

/// Anything that can generate text from a prompt or instruction.
///
/// Failures come back as a tagged [`UpstreamError`]; an authentication
/// rejection is `UpstreamError::Auth` and it is up to the caller how to
/// present it.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Client name, used in logs
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamError>;
}
