//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request| {
        tracing::info_span!(
            "request",
            id = %Uuid::new_v4(),
            method = %req.method(),
            uri = %req.uri(),
        )
    });

    Router::new()
        // Completion routes, under both the legacy and descriptive names
        .route("/query-llm", post(handlers::direct_completion))
        .route("/direct-completion", post(handlers::direct_completion))
        .route("/ask-question", post(handlers::context_completion))
        .route("/context-completion", post(handlers::context_completion))
        // Credential route
        .route("/api-key-setup", post(handlers::set_credential))
        .route("/set-credential", post(handlers::set_credential))
        // Service routes
        .route("/health", get(handlers::health))
        .route("/stats", get(handlers::stats))
        // Add middleware
        .layer(trace)
        .layer(cors)
        // Add state
        .with_state(state)
}
