//! OpenSASE Forms Intake API
//!
//! Accepts submissions against published forms and resolves the identity
//! behind a request's session.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        FORMS INTAKE API                      │
//! │                                                              │
//! │   POST /api/submissions          GET /api/auth/session       │
//! │            │                              │                  │
//! │   ┌────────▼─────────┐          ┌─────────▼──────────┐       │
//! │   │      intake      │          │      session       │       │
//! │   │ validate → check │          │ resolve → project  │       │
//! │   │     → record     │          │  (faults → None)   │       │
//! │   └────────┬─────────┘          └─────────┬──────────┘       │
//! │            │                              │                  │
//! │   ┌────────▼─────────┐          ┌─────────▼──────────┐       │
//! │   │    FormStore     │          │  IdentityProvider  │       │
//! │   └──────────────────┘          └────────────────────┘       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod intake;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;

use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub use error::{ApiError, ApiResult};
pub use models::*;
pub use session::{resolve_identity, IdentityProvider, JwtIdentityProvider, RequestContext};
pub use store::{FormStore, InMemoryFormStore};

/// API state
pub struct AppState {
    /// Form and submission store
    pub forms: Arc<dyn FormStore>,
    /// Session source
    pub sessions: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Bundle the store and identity provider shared by all handlers
    pub fn new(forms: Arc<dyn FormStore>, sessions: Arc<dyn IdentityProvider>) -> Self {
        Self { forms, sessions }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "OpenSASE Forms API",
        version = "1.0.0",
        description = "Form submission intake and session lookup",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::submissions::create_submission,
        routes::session::get_session,
    ),
    components(
        schemas(
            ErrorResponse,
            SubmissionRequest, SubmissionAck, SubmissionStatus, Submission,
            Form, Identity,
            routes::health::HealthResponse
        )
    ),
    tags(
        (name = "health", description = "Readiness endpoints"),
        (name = "submissions", description = "Form submission intake"),
        (name = "auth", description = "Session lookup")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/submissions", routes::submissions::router())
        .nest("/auth", routes::session::router())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
