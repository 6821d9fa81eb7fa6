//! Session lookup endpoint

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::session::{resolve_identity, RequestContext};
use crate::{models::Identity, AppState};

/// Routes mounted under `/api/auth`
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/session", get(get_session))
}

/// Current identity, `null` when unauthenticated
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (
            status = 200,
            description = "Resolved identity, null when unauthenticated",
            body = Option<Identity>
        )
    ),
    tag = "auth"
)]
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
) -> Json<Option<Identity>> {
    Json(resolve_identity(state.sessions.as_ref(), &ctx).await)
}
