//! API Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

// ============ Forms ============

/// Form as seen by the intake path. Authored elsewhere; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Form {
    /// Opaque form id
    pub id: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Whether the form currently accepts submissions
    #[serde(default)]
    pub is_published: bool,
}

impl Form {
    /// Build a form record
    pub fn new(id: impl Into<String>, title: impl Into<String>, is_published: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_published,
        }
    }
}

// ============ Submissions ============

/// Submission lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// Awaiting review; the only status intake produces
    #[default]
    Pending,
    /// Accepted by a reviewer
    Approved,
    /// Declined by a reviewer
    Rejected,
}

/// Recorded response to a form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    /// Store-assigned id
    pub id: String,
    /// Form the submission answers
    pub form_id: String,
    /// Submitted payload, stored verbatim
    #[schema(value_type = Object)]
    pub data: Value,
    /// Review status
    pub status: SubmissionStatus,
    /// Store-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// Submission as handed to the store; id and timestamp are assigned there.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    /// Form the submission answers
    pub form_id: String,
    /// Submitted payload
    pub data: Value,
    /// Initial status
    pub status: SubmissionStatus,
}

/// Intake request body.
///
/// Both fields are optional at the type level so that a missing field surfaces
/// as a validation failure rather than a deserialization error.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SubmissionRequest {
    /// Target form id
    #[serde(default)]
    pub form_id: Option<String>,
    /// Payload of any JSON shape
    #[serde(default)]
    #[schema(value_type = Object)]
    pub data: Option<Value>,
}

/// Intake acknowledgment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionAck {
    /// Always `true` on an accepted submission
    pub success: bool,
    /// Id of the new submission
    pub id: String,
}

impl SubmissionAck {
    /// Acknowledge the submission stored under `id`
    pub fn accepted(id: impl Into<String>) -> Self {
        Self {
            success: true,
            id: id.into(),
        }
    }
}

// ============ Sessions ============

/// Normalized projection of an authenticated principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    /// Principal id
    pub id: String,
    /// Email address, when known
    pub email: Option<String>,
    /// Display name, when known
    pub name: Option<String>,
}

/// Error body shared by every rejection
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable reason
    pub message: String,
}
