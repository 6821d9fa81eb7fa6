//! Submission intake endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::intake::accept_submission;
use crate::{models::*, AppState};

/// Routes mounted under `/api/submissions`
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(create_submission))
}

/// Submit a response to a published form
#[utoipa::path(
    post,
    path = "/api/submissions",
    request_body = SubmissionRequest,
    responses(
        (status = 200, description = "Submission recorded", body = SubmissionAck),
        (status = 400, description = "Missing form_id or data", body = ErrorResponse),
        (status = 404, description = "Form not found or not published", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse)
    ),
    tag = "submissions"
)]
pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> ApiResult<Json<SubmissionAck>> {
    let Json(request) = payload.map_err(body_error)?;
    let ack = accept_submission(state.forms.as_ref(), request).await?;
    Ok(Json(ack))
}

fn body_error(rejection: JsonRejection) -> ApiError {
    // keep the extractor's 413 for oversized bodies
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BodyTooLarge
    } else {
        ApiError::MalformedBody(rejection.body_text())
    }
}
