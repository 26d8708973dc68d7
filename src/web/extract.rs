//! Request body extraction with validation errors in the gateway's format

use crate::error::ApiError;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

/// `Json` extractor whose rejection is a 422 `{"detail": ...}` body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ValidJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
