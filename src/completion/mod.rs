//! Completion module
//!
//! Defines the CompletionClient capability and its OpenAI implementation.

mod models;
mod openai;
mod traits;

pub use models::CompletionRequest;
pub use openai::OpenAiCompletion;
pub use traits::CompletionClient;
