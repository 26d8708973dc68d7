//! Completion request types and the OpenAI wire format

use serde::{Deserialize, Serialize};

/// Input to a completion client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionRequest {
    /// Free text from the user
    Prompt(String),
    /// A system-level instruction built by the service
    Instruction(String),
}

impl CompletionRequest {
    pub fn prompt(text: impl Into<String>) -> Self {
        CompletionRequest::Prompt(text.into())
    }

    pub fn instruction(text: impl Into<String>) -> Self {
        CompletionRequest::Instruction(text.into())
    }

    /// Chat role the text is sent under
    pub fn role(&self) -> &'static str {
        match self {
            CompletionRequest::Prompt(_) => "user",
            CompletionRequest::Instruction(_) => "system",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            CompletionRequest::Prompt(text) | CompletionRequest::Instruction(text) => text,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatReply {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if any. A choice whose content is null
    /// yields an empty string.
    pub fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.and_then(|m| m.content).unwrap_or_default())
    }
}
