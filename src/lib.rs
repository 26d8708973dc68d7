//! ask-relay: a small HTTP gateway in front of a completion API
//!
//! Prompts are answered either directly by the completion service, or from
//! web search results that the completion service is asked to summarize.

pub mod completion;
pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod orchestrator;
pub mod search;
pub mod secrets;
pub mod web;

pub use config::Settings;
pub use error::{ApiError, SecretError, UpstreamError};
pub use orchestrator::QueryOrchestrator;
pub use secrets::SecretStore;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
