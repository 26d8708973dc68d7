//! Error types shared by the clients, the orchestrator and the gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors raised by the credential store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    /// No credential stored under this name
    #[error("Credential not found: {0}")]
    NotFound(String),
}

/// Errors raised while talking to an external service
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// Input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The credential needed for the call is not configured
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// The service rejected the credential
    #[error("Authentication failed")]
    Auth,

    /// Any other transport, status or decoding failure
    #[error("Upstream error: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Whether this is an authentication rejection
    pub fn is_auth(&self) -> bool {
        matches!(self, UpstreamError::Auth)
    }
}

impl From<SecretError> for UpstreamError {
    fn from(err: SecretError) -> Self {
        match err {
            SecretError::NotFound(name) => UpstreamError::MissingCredential(name),
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Transport("Request timeout".to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// Errors returned by gateway handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body, never dispatched
    #[error("{0}")]
    Validation(String),

    /// Failure while serving the request
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
