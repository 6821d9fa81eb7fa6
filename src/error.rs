//! Error types for the forms API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::store::StoreError;

/// Errors surfaced to HTTP callers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request envelope is missing `form_id` or `data`
    #[error("Missing form_id or data")]
    Validation,

    /// Body could not be parsed as a submission request
    #[error("Invalid request body")]
    MalformedBody(String),

    /// Body exceeds the extractor's size limit
    #[error("Request body too large")]
    BodyTooLarge,

    /// Target form is absent or not published
    #[error("Form not found or not published")]
    NotFound,

    /// Store failure while persisting
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Store(err) => {
                tracing::error!(error = %err, "submission store failure");
                "Internal server error".to_string()
            }
            ApiError::MalformedBody(detail) => {
                tracing::debug!(detail = %detail, "rejected malformed body");
                self.to_string()
            }
            other => other.to_string(),
        };

        (self.status(), Json(ErrorResponse { message })).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;
