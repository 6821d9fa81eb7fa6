use async_trait::async_trait;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use opensase_forms_api::session::{
    issue_token, ProviderError, Session, SessionUser, SESSION_COOKIE,
};
use opensase_forms_api::{
    build_router, AppState, IdentityProvider, InMemoryFormStore, JwtIdentityProvider,
    RequestContext,
};

const SECRET: &[u8] = b"integration-secret";

fn server_with(sessions: Arc<dyn IdentityProvider>) -> TestServer {
    let state = AppState::new(Arc::new(InMemoryFormStore::new()), sessions);
    TestServer::new(build_router(state)).unwrap()
}

fn token_for(user: Option<SessionUser>) -> String {
    issue_token(SECRET, user, chrono::Duration::hours(1)).unwrap()
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

#[tokio::test]
async fn test_resolves_bearer_identity() {
    let server = server_with(Arc::new(JwtIdentityProvider::new(SECRET)));
    let token = token_for(Some(SessionUser {
        id: "u1".into(),
        email: Some("a@x.com".into()),
        name: Some("A".into()),
    }));

    let response = server
        .get("/api/auth/session")
        .add_header(header::AUTHORIZATION, bearer(&token))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"id": "u1", "email": "a@x.com", "name": "A"})
    );
}

#[tokio::test]
async fn test_resolves_cookie_identity() {
    let server = server_with(Arc::new(JwtIdentityProvider::new(SECRET)));
    let token = token_for(Some(SessionUser {
        id: "u2".into(),
        email: None,
        name: None,
    }));
    let cookie = HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap();

    let response = server
        .get("/api/auth/session")
        .add_header(header::COOKIE, cookie)
        .await;

    assert_eq!(
        response.json::<Value>(),
        json!({"id": "u2", "email": null, "name": null})
    );
}

#[tokio::test]
async fn test_unauthenticated_is_null() {
    let server = server_with(Arc::new(JwtIdentityProvider::new(SECRET)));

    let response = server.get("/api/auth/session").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn test_session_without_user_is_null() {
    let server = server_with(Arc::new(JwtIdentityProvider::new(SECRET)));

    let response = server
        .get("/api/auth/session")
        .add_header(header::AUTHORIZATION, bearer(&token_for(None)))
        .await;

    assert_eq!(response.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn test_garbage_token_degrades_to_null() {
    let server = server_with(Arc::new(JwtIdentityProvider::new(SECRET)));

    let response = server
        .get("/api/auth/session")
        .add_header(header::AUTHORIZATION, bearer("not-a-jwt"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), Value::Null);
}

struct Offline;

#[async_trait]
impl IdentityProvider for Offline {
    async fn current_session(&self, _: &RequestContext) -> Result<Option<Session>, ProviderError> {
        Err(ProviderError::Unavailable("identity backend unreachable".into()))
    }
}

#[tokio::test]
async fn test_provider_outage_degrades_to_null() {
    let server = server_with(Arc::new(Offline));

    let response = server.get("/api/auth/session").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), Value::Null);
}
