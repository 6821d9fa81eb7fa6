//! Readiness endpoint
//!
//! Reports whether the form store answers lookups. The lookup id never matches a
//! real form; only the store's ability to answer matters.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::AppState;

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");
const READINESS_FORM_ID: &str = "__readiness_check__";

/// Service readiness report
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,
    /// Crate name of the running service
    pub service: String,
    /// Crate version of the running service
    pub version: String,
    /// `ok` when the form store answered, `unavailable` otherwise
    pub form_store: String,
    /// RFC 3339 time the report was produced
    pub timestamp: String,
}

/// Readiness check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Form store reachable", body = HealthResponse),
        (status = 503, description = "Form store unavailable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, form_store) = match state.forms.find_form(READINESS_FORM_ID).await {
        Ok(_) => (StatusCode::OK, "healthy", "ok"),
        Err(err) => {
            tracing::warn!(error = %err, "form store failed readiness lookup");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
        }
    };

    let report = HealthResponse {
        status: status.into(),
        service: SERVICE_NAME.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        form_store: form_store.into(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };
    (code, Json(report))
}
