//! Query orchestration
//!
//! Combines a [`SearchClient`] and a [`CompletionClient`] into the two
//! operations the gateway exposes: a plain completion, and an answer
//! synthesized from search results.

use crate::completion::{CompletionClient, CompletionRequest};
use crate::error::UpstreamError;
use crate::search::{SearchClient, SearchResult};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Returned by [`QueryOrchestrator::direct`] when the completion service
/// rejects the API key.
pub const WRONG_KEY_MESSAGE: &str = "wrong key provided";

const INSTRUCTION_PREAMBLE: &str = "Combine the information from these sources and explain the information to the user.\n\
Provide a general overview of the subject of the information.\n";

const SOURCES_HEADER: &str = "\n\nSources:\n\n";

/// Coordinates the search and completion clients
#[derive(Clone)]
pub struct QueryOrchestrator {
    search: Arc<dyn SearchClient>,
    completion: Arc<dyn CompletionClient>,
}

impl QueryOrchestrator {
    pub fn new(search: Arc<dyn SearchClient>, completion: Arc<dyn CompletionClient>) -> Self {
        Self { search, completion }
    }

    /// Send the prompt straight to the completion client.
    ///
    /// An authentication rejection is answered with [`WRONG_KEY_MESSAGE`];
    /// every other failure is returned to the caller.
    pub async fn direct(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = CompletionRequest::prompt(prompt);
        match self.completion.complete(&request).await {
            Ok(text) => Ok(text),
            Err(e) if e.is_auth() => {
                warn!(
                    "{} rejected the configured API key",
                    self.completion.name()
                );
                Ok(WRONG_KEY_MESSAGE.to_string())
            }
            Err(e) => Err(e),
        }
    }

    /// Search for `query`, ask the completion client to explain the
    /// snippets, and append the list of sources.
    ///
    /// The search call completes before the completion call starts. An empty
    /// result list still produces a completion call, with an empty context.
    pub async fn answer_with_context(&self, query: &str) -> Result<String, UpstreamError> {
        let results = self.search.search(query).await?;
        info!(
            "{} returned {} results for '{}'",
            self.search.name(),
            results.len(),
            query
        );

        let instruction = build_instruction(query, &results);
        debug!("Instruction is {} bytes", instruction.len());

        let answer = self
            .completion
            .complete(&CompletionRequest::instruction(instruction))
            .await?;

        Ok(format!("{}{}{}", answer, SOURCES_HEADER, format_sources(&results)))
    }
}

/// Result contents joined by newlines, in the order given
pub fn build_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full instruction sent to the completion client
pub fn build_instruction(query: &str, results: &[SearchResult]) -> String {
    format!(
        "{}{}\nUser original prompt:{}",
        INSTRUCTION_PREAMBLE,
        build_context(results),
        query
    )
}

/// One "title\nurl" entry per result, separated by a blank line
pub fn format_sources(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("{}\n{}", r.title, r.url))
        .collect::<Vec<_>>()
        .join("\n\n")
}


#[cfg(test)]
mod tests {
    use super::mock::{MockCompletion, MockSearch};
    use super::*;

    fn two_results() -> Vec<SearchResult> {
        vec![
            SearchResult::new("A", "u1", "c1"),
            SearchResult::new("B", "u2", "c2"),
        ]
    }

    #[tokio::test]
    async fn test_direct_passes_text_through() {
        let search = MockSearch::returning(vec![]);
        let completion = MockCompletion::returning("  exact\ntext  ");
        let orchestrator = QueryOrchestrator::new(search.clone(), completion.clone());

        let out = orchestrator.direct("hey wassup").await.unwrap();
        assert_eq!(out, "  exact\ntext  ");
        assert_eq!(completion.calls(), vec![CompletionRequest::prompt("hey wassup")]);
        assert!(search.calls().is_empty());
    }

    #[tokio::test]
    async fn test_direct_auth_failure_becomes_message() {
        let orchestrator = QueryOrchestrator::new(
            MockSearch::returning(vec![]),
            MockCompletion::failing(UpstreamError::Auth),
        );
        assert_eq!(orchestrator.direct("hi").await.unwrap(), "wrong key provided");
    }

    #[tokio::test]
    async fn test_direct_other_failures_propagate() {
        let orchestrator = QueryOrchestrator::new(
            MockSearch::returning(vec![]),
            MockCompletion::failing(UpstreamError::Transport("connection reset".into())),
        );
        assert_eq!(
            orchestrator.direct("hi").await,
            Err(UpstreamError::Transport("connection reset".into()))
        );
    }

    #[tokio::test]
    async fn test_answer_with_context_scenario() {
        let search = MockSearch::returning(two_results());
        let completion = MockCompletion::returning("overview");
        let orchestrator = QueryOrchestrator::new(search.clone(), completion.clone());

        let out = orchestrator.answer_with_context("x").await.unwrap();

        assert_eq!(search.calls(), vec!["x".to_string()]);
        let sent = completion.calls();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            CompletionRequest::instruction(
                "Combine the information from these sources and explain the information to the user.\n\
                 Provide a general overview of the subject of the information.\n\
                 c1\nc2\nUser original prompt:x"
            )
        );
        assert_eq!(out, "overview\n\nSources:\n\nA\nu1\n\nB\nu2");
    }

    #[tokio::test]
    async fn test_answer_with_no_results_still_completes() {
        let search = MockSearch::returning(vec![]);
        let completion = MockCompletion::returning("nothing found");
        let orchestrator = QueryOrchestrator::new(search, completion.clone());

        let out = orchestrator.answer_with_context("obscure").await.unwrap();

        let sent = completion.calls();
        assert_eq!(sent.len(), 1);
        assert!(sent[0]
            .text()
            .ends_with("subject of the information.\n\nUser original prompt:obscure"));
        assert_eq!(out, "nothing found\n\nSources:\n\n");
    }

    #[tokio::test]
    async fn test_search_failure_skips_completion() {
        let completion = MockCompletion::returning("unused");
        let orchestrator = QueryOrchestrator::new(
            MockSearch::failing(UpstreamError::Transport("timeout".into())),
            completion.clone(),
        );

        assert!(orchestrator.answer_with_context("x").await.is_err());
        assert!(completion.calls().is_empty());
    }

    #[tokio::test]
    async fn test_context_auth_failure_propagates() {
        let orchestrator = QueryOrchestrator::new(
            MockSearch::returning(two_results()),
            MockCompletion::failing(UpstreamError::Auth),
        );
        assert_eq!(
            orchestrator.answer_with_context("x").await,
            Err(UpstreamError::Auth)
        );
    }

    #[test]
    fn test_context_and_sources_cover_every_result() {
        for n in 0..5 {
            let results: Vec<SearchResult> = (0..n)
                .map(|i| SearchResult::new(format!("t{i}"), format!("u{i}"), format!("c{i}")))
                .collect();

            let context = build_context(&results);
            let expected: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
            assert_eq!(context, expected.join("\n"));

            let sources = format_sources(&results);
            let pairs: Vec<&str> = if n == 0 {
                vec![]
            } else {
                sources.split("\n\n").collect()
            };
            assert_eq!(pairs.len(), n);
            for (i, pair) in pairs.iter().enumerate() {
                assert_eq!(*pair, format!("t{i}\nu{i}"));
            }
        }
    }
}
