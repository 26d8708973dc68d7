//! Application state shared across handlers

use crate::completion::{CompletionClient, OpenAiCompletion};
use crate::config::Settings;
use crate::metrics::Metrics;
use crate::network::HttpClient;
use crate::orchestrator::QueryOrchestrator;
use crate::search::{SearchClient, TavilySearch};
use crate::secrets::SecretStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Credential store, shared with the upstream clients
    pub secrets: SecretStore,
    /// Search + completion orchestrator
    pub orchestrator: Arc<QueryOrchestrator>,
    /// Request metrics
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Build the production clients from settings
    pub fn new(settings: &Settings, secrets: SecretStore, client: HttpClient) -> Self {
        let search: Arc<dyn SearchClient> = Arc::new(TavilySearch::new(
            client.clone(),
            secrets.clone(),
            settings.search.clone(),
        ));
        let completion: Arc<dyn CompletionClient> = Arc::new(OpenAiCompletion::new(
            client,
            secrets.clone(),
            settings.completion.clone(),
        ));

        Self::with_clients(secrets, search, completion)
    }

    /// Build state around arbitrary client implementations
    pub fn with_clients(
        secrets: SecretStore,
        search: Arc<dyn SearchClient>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            secrets,
            orchestrator: Arc::new(QueryOrchestrator::new(search, completion)),
            metrics: Arc::new(Metrics::new()),
        }
    }
}
