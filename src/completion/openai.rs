//! OpenAI chat-completions client

use super::models::{ChatMessage, ChatRequest, ChatResponse, CompletionRequest};
use super::traits::CompletionClient;
use crate::config::CompletionSettings;
use crate::error::UpstreamError;
use crate::network::HttpClient;
use crate::secrets::SecretStore;
use async_trait::async_trait;
use tracing::{debug, error, warn};

/// Completion client backed by the OpenAI chat API
pub struct OpenAiCompletion {
    client: HttpClient,
    secrets: SecretStore,
    settings: CompletionSettings,
}

impl OpenAiCompletion {
    pub fn new(client: HttpClient, secrets: SecretStore, settings: CompletionSettings) -> Self {
        Self {
            client,
            secrets,
            settings,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletion {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamError> {
        let api_key = self.secrets.get(&self.settings.api_key_name)?;

        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: request.role(),
                content: request.text(),
            }],
        };

        debug!(
            "Sending {} message to OpenAI model {}",
            request.role(),
            self.settings.model
        );

        let response = self
            .client
            .post_json(&self.endpoint(), &body, Some(&api_key))
            .await
            .map_err(|e| {
                error!("OpenAI API request failed: {}", e);
                e
            })?;

        if !response.is_success() {
            return match response.status {
                401 => {
                    warn!("OpenAI rejected the API key");
                    Err(UpstreamError::Auth)
                }
                status => {
                    error!("OpenAI API error ({}): {}", status, response.excerpt());
                    Err(UpstreamError::Transport(format!(
                        "OpenAI API error: HTTP {}",
                        status
                    )))
                }
            };
        }

        let decoded: ChatResponse = response.json()?;
        decoded
            .into_text()
            .ok_or_else(|| UpstreamError::Transport("No content in OpenAI response".to_string()))
    }
}
