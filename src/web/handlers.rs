//! HTTP request handlers

use super::extract::ValidJson;
use super::state::AppState;
use crate::error::{ApiError, UpstreamError};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Instant;
use tracing::info;

/// Body of the completion endpoints
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub prompt: String,
}

/// Response of the completion endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

/// Body of the credential endpoint
#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    pub name: String,
    pub key: String,
}

impl QueryRequest {
    fn validate(&self) -> Result<&str, ApiError> {
        if self.prompt.trim().is_empty() {
            return Err(ApiError::Validation("prompt must not be empty".to_string()));
        }
        Ok(&self.prompt)
    }
}

/// Run an orchestrator call and record it under `operation`
async fn timed<F>(state: &AppState, operation: &str, call: F) -> Result<String, ApiError>
where
    F: Future<Output = Result<String, UpstreamError>>,
{
    let start = Instant::now();
    let result = call.await;
    state.metrics.record(
        operation,
        result.is_ok(),
        start.elapsed().as_millis() as u64,
    );
    Ok(result?)
}

/// Plain completion handler
pub async fn direct_completion(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let prompt = payload.validate()?;
    let response = timed(&state, "direct", state.orchestrator.direct(prompt)).await?;
    Ok(Json(QueryResponse { response }))
}

/// Search-grounded completion handler
pub async fn context_completion(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let prompt = payload.validate()?;
    let response = timed(
        &state,
        "context",
        state.orchestrator.answer_with_context(prompt),
    )
    .await?;
    Ok(Json(QueryResponse { response }))
}

/// Credential update handler
pub async fn set_credential(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CredentialRequest>,
) -> Result<StatusCode, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("name must not be empty".to_string()));
    }

    state.secrets.set(payload.name.clone(), payload.key);
    state.metrics.record("set_credential", true, 0);
    info!("Credential {} updated through the API", payload.name);
    Ok(StatusCode::OK)
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "credentials": state.secrets.names(),
    }))
}

/// Metrics handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionRequest;
    use crate::orchestrator::mock::{MockCompletion, MockSearch};
    use crate::search::SearchResult;
    use crate::secrets::SecretStore;
    use crate::web::create_router;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post(state: AppState, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_direct_completion_on_both_paths() {
        for uri in ["/query-llm", "/direct-completion"] {
            let completion = MockCompletion::returning("hello there");
            let state = AppState::with_clients(
                SecretStore::new(),
                MockSearch::returning(vec![]),
                completion.clone(),
            );

            let (status, body) = post(state, uri, r#"{"prompt": "hey"}"#).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["response"], "hello there");
            assert_eq!(completion.calls(), vec![CompletionRequest::prompt("hey")]);
        }
    }

    #[tokio::test]
    async fn test_context_completion_on_both_paths() {
        for uri in ["/ask-question", "/context-completion"] {
            let search = MockSearch::returning(vec![SearchResult::new("A", "u1", "c1")]);
            let state = AppState::with_clients(
                SecretStore::new(),
                search.clone(),
                MockCompletion::returning("answer"),
            );

            let (status, body) = post(state, uri, r#"{"prompt": "x"}"#).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["response"], "answer\n\nSources:\n\nA\nu1");
            assert_eq!(search.calls(), vec!["x".to_string()]);
        }
    }

    #[tokio::test]
    async fn test_missing_prompt_is_rejected_before_dispatch() {
        let search = MockSearch::returning(vec![]);
        let completion = MockCompletion::returning("unused");
        let state =
            AppState::with_clients(SecretStore::new(), search.clone(), completion.clone());

        for uri in ["/query-llm", "/ask-question"] {
            let (status, body) = post(state.clone(), uri, r#"{"question": "hey"}"#).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["detail"].as_str().unwrap().contains("prompt"));

            let (status, _) = post(state.clone(), uri, r#"{"prompt": "  "}"#).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

            let (status, _) = post(state.clone(), uri, "not json").await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        }

        assert!(search.calls().is_empty());
        assert!(completion.calls().is_empty());
    }

    #[tokio::test]
    async fn test_auth_failure_on_direct_is_a_normal_response() {
        let state = AppState::with_clients(
            SecretStore::new(),
            MockSearch::returning(vec![]),
            MockCompletion::failing(UpstreamError::Auth),
        );
        let (status, body) = post(state, "/query-llm", r#"{"prompt": "hey"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "wrong key provided");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_500_with_detail() {
        let state = AppState::with_clients(
            SecretStore::new(),
            MockSearch::returning(vec![]),
            MockCompletion::failing(UpstreamError::Transport("rate limited".into())),
        );
        let (status, body) = post(state.clone(), "/query-llm", r#"{"prompt": "hey"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Upstream error: rate limited");

        let snapshot = state.metrics.snapshot();
        assert_eq!(snapshot.operations["direct"].failures, 1);
    }

    #[tokio::test]
    async fn test_set_credential_write_then_read() {
        let secrets = SecretStore::new();
        let state = AppState::with_clients(
            secrets.clone(),
            MockSearch::returning(vec![]),
            MockCompletion::returning("unused"),
        );

        let (status, body) = post(
            state.clone(),
            "/api-key-setup",
            r#"{"name": "OPENAI_API_KEY", "key": "sk-one"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::Value::Null);
        assert_eq!(secrets.get("OPENAI_API_KEY").unwrap(), "sk-one");

        let (status, _) = post(
            state,
            "/set-credential",
            r#"{"name": "OPENAI_API_KEY", "key": "sk-two"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(secrets.get("OPENAI_API_KEY").unwrap(), "sk-two");
    }

    #[tokio::test]
    async fn test_set_credential_requires_fields() {
        let secrets = SecretStore::new();
        let state = AppState::with_clients(
            secrets.clone(),
            MockSearch::returning(vec![]),
            MockCompletion::returning("unused"),
        );

        let (status, _) = post(state.clone(), "/set-credential", r#"{"name": "X"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let (status, _) = post(state, "/set-credential", r#"{"name": "", "key": "k"}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(secrets.is_empty());
    }
}
