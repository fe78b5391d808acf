// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT session middleware and extractors.
//!
//! `resolve_session` runs on every request, so by the time a handler runs the
//! session is either signed in or signed out, never pending.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie carrying the session JWT.
pub const SESSION_COOKIE: &str = "recipe_session";

/// Session lifetime in seconds (30 days).
pub const SESSION_TTL_SECS: usize = 30 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (auth provider uid)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub uid: String,
}

/// Session state of a request, settled before any handler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    SignedOut,
    SignedIn(AuthUser),
}

impl Session {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Session::SignedIn(user) => Some(user),
            Session::SignedOut => None,
        }
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Session>()
            .cloned()
            .unwrap_or(Session::SignedOut))
    }
}

/// Handlers taking an `AuthUser` answer 401 to signed-out requests.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Session>() {
            Some(Session::SignedIn(user)) => Ok(user.clone()),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Pull the raw token from the session cookie or the Authorization header.
fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Verify a session token and return its user.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Option<AuthUser> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).ok()?;
    if token_data.claims.sub.is_empty() {
        return None;
    }

    Some(AuthUser {
        uid: token_data.claims.sub,
    })
}

/// Middleware that records the session without rejecting anonymous requests.
///
/// A missing or invalid token yields `Session::SignedOut`.
pub async fn resolve_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = extract_token(&jar, request.headers())
        .and_then(|token| verify_jwt(&token, &state.config.jwt_signing_key))
        .map(Session::SignedIn)
        .unwrap_or(Session::SignedOut);

    request.extensions_mut().insert(session);

    next.run(request).await
}

/// Create a JWT for a user session.
pub fn create_jwt(uid: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: uid.to_string(),
        iat: now,
        exp: now + SESSION_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
