// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password authentication routes.

use axum::{extract::State, routing::{get, post}, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, Session, SESSION_COOKIE, SESSION_TTL_SECS};
use crate::services::Identity;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", post(sign_out))
        .route("/auth/session", get(session))
}

/// Sign-up / sign-in request body.
#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password should be at least 6 characters."))]
    pub password: String,
}

impl Credentials {
    fn check(&self) -> Result<()> {
        self.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| "Invalid credentials".to_string());
            AppError::BadRequest(message)
        })
    }
}

/// Current session as seen by the backend.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionResponse {
    SignedIn {
        uid: String,
        /// Session token, returned only right after sign-in
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
    SignedOut,
}

/// Build the session cookie. `Secure` is dropped only for plain-http frontends.
fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    let secure = !state.config.frontend_url.starts_with("http://");
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS as i64))
        .build()
}

fn start_session(
    state: &AppState,
    jar: CookieJar,
    identity: Identity,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let token = create_jwt(&identity.uid, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let jar = jar.add(session_cookie(state, token.clone()));

    Ok((
        jar,
        Json(SessionResponse::SignedIn {
            uid: identity.uid,
            token: Some(token),
        }),
    ))
}

/// Create an account and sign in.
async fn sign_up(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    credentials.check()?;

    let identity = state
        .identity
        .sign_up(credentials.email.trim(), &credentials.password)
        .await?;

    tracing::info!(uid = %identity.uid, "Account created");
    start_session(&state, jar, identity)
}

/// Sign in with an existing account.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    credentials.check()?;

    let identity = state
        .identity
        .sign_in(credentials.email.trim(), &credentials.password)
        .await?;

    tracing::info!(uid = %identity.uid, "Signed in");
    start_session(&state, jar, identity)
}

/// Clear the session cookie.
async fn sign_out(jar: CookieJar) -> (CookieJar, Json<SessionResponse>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(SessionResponse::SignedOut))
}

async fn session(session: Session) -> Json<SessionResponse> {
    Json(match session {
        Session::SignedIn(user) => SessionResponse::SignedIn {
            uid: user.uid,
            token: None,
        },
        Session::SignedOut => SessionResponse::SignedOut,
    })
}
