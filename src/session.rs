//! Session resolution
//!
//! [`resolve_identity`] turns whatever the identity provider knows about the
//! current request into an [`Identity`], or `None`. Provider failures never
//! reach the caller; they degrade to "unauthenticated".

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::models::Identity;

/// Cookie carrying the session token when no bearer header is sent
pub const SESSION_COOKIE: &str = "session-token";

/// Per-request context handed to the identity provider
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    headers: HeaderMap,
}

impl RequestContext {
    /// Wrap the headers of an inbound request
    pub fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Raw request headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Token from `Authorization: Bearer ...`, falling back to the session cookie
    pub fn session_token(&self) -> Option<&str> {
        self.bearer_token().or_else(|| self.cookie(SESSION_COOKIE))
    }

    fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, value)| *key == name && !value.is_empty())
            .map(|(_, value)| value)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Infallible> {
        Ok(Self::new(parts.headers.clone()))
    }
}

/// User principal carried by a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Provider-assigned user id
    pub id: String,
    /// Email address, if the provider knows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name, if the provider knows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<SessionUser> for Identity {
    fn from(user: SessionUser) -> Self {
        Identity {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Session as resolved by a provider
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    /// Principal the session belongs to, if any
    pub user: Option<SessionUser>,
    /// Expiry reported by the provider
    pub expires: Option<DateTime<Utc>>,
}

/// Identity provider errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Token failed signature, format or expiry checks
    #[error("invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Requested token lifetime cannot be represented
    #[error("session lifetime out of range")]
    InvalidTtl,

    /// Provider could not be reached
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Provider lookup result
pub type SessionResult = Result<Option<Session>, ProviderError>;

/// External identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Session for the request, `None` when the request carries none
    async fn current_session(&self, ctx: &RequestContext) -> SessionResult;
}

/// Resolve the authenticated principal for a request.
pub async fn resolve_identity(
    provider: &dyn IdentityProvider,
    ctx: &RequestContext,
) -> Option<Identity> {
    let session = match provider.current_session(ctx).await {
        Ok(session) => session?,
        Err(err) => {
            tracing::warn!(error = %err, "session lookup failed, request is unauthenticated");
            return None;
        }
    };

    session.user.map(Identity::from)
}

// ============ JWT provider ============

/// Token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Principal, absent for anonymous sessions
    #[serde(default)]
    pub user: Option<SessionUser>,
    /// Expiry as a unix timestamp
    pub exp: usize,
}

/// HS256 session tokens
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    /// Provider verifying tokens signed with `secret`
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn current_session(&self, ctx: &RequestContext) -> SessionResult {
        let Some(token) = ctx.session_token() else {
            return Ok(None);
        };

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        Ok(Some(Session {
            user: claims.user,
            expires: DateTime::from_timestamp(claims.exp as i64, 0),
        }))
    }
}

/// Mint a session token for `user`, valid for `ttl`.
pub fn issue_token(
    secret: &[u8],
    user: Option<SessionUser>,
    ttl: Duration,
) -> Result<String, ProviderError> {
    let exp = Utc::now()
        .checked_add_signed(ttl)
        .ok_or(ProviderError::InvalidTtl)?
        .timestamp();

    let claims = Claims {
        user,
        exp: usize::try_from(exp).map_err(|_| ProviderError::InvalidTtl)?,
    };

    let key = EncodingKey::from_secret(secret);
    Ok(encode(&Header::default(), &claims, &key)?)
}
