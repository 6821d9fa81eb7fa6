//! Submission intake
//!
//! Validate the envelope, check the target form, then record the submission.
//! No submission is ever written against a form that is missing or unpublished,
//! but the check and the write are two separate store calls: a form unpublished
//! in between still receives the submission.

use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewSubmission, SubmissionAck, SubmissionRequest, SubmissionStatus};
use crate::store::FormStore;

/// Accept one submission addressed to a form.
///
/// Store failures during the write are returned as [`ApiError::Store`] and are
/// not retried.
pub async fn accept_submission(
    store: &dyn FormStore,
    request: SubmissionRequest,
) -> ApiResult<SubmissionAck> {
    let (form_id, data) = validate_envelope(request)?;

    let form = store.find_form(&form_id).await?;
    // unpublished collapses into not-found
    if !form.is_some_and(|f| f.is_published) {
        tracing::debug!(form_id = %form_id, "submission rejected: form unavailable");
        return Err(ApiError::NotFound);
    }

    let created = store
        .create_submission(NewSubmission {
            form_id,
            data,
            status: SubmissionStatus::Pending,
        })
        .await?;

    tracing::info!(
        form_id = %created.form_id,
        submission_id = %created.id,
        "submission accepted"
    );
    Ok(SubmissionAck::accepted(created.id))
}

fn validate_envelope(request: SubmissionRequest) -> ApiResult<(String, Value)> {
    match (request.form_id, request.data) {
        (Some(form_id), Some(data)) if !form_id.is_empty() && is_truthy(&data) => {
            Ok((form_id, data))
        }
        _ => {
            tracing::debug!("submission rejected: incomplete envelope");
            Err(ApiError::Validation)
        }
    }
}

/// Presence test for the payload. Empty objects and arrays count as present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
