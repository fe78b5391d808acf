// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password accounts via the Identity Toolkit REST API.
//!
//! The provider owns accounts; we only keep its stable `localId` as the uid.

use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;

/// Account identity returned after a successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AppError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AppError>;
}

/// Identity Toolkit client.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn accounts_call(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AppError> {
        let url = format!("{}/accounts:{}", self.base_url, method);

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AuthUnavailable(format!("{}: {}", method, e)))?;

        if response.status().is_server_error() {
            let status = response.status();
            return Err(AppError::AuthUnavailable(format!("{}: HTTP {}", method, status)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let code = response
                .json::<ProviderErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_default();
            tracing::warn!(%status, code = %code, method, "Auth provider rejected request");
            return Err(AppError::AuthProvider(friendly_message(&code).to_string()));
        }

        let account: AccountResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Auth response parse error: {}", e)))?;

        Ok(Identity {
            uid: account.local_id,
            email: account.email.unwrap_or_else(|| email.to_string()),
        })
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        self.accounts_call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        self.accounts_call("signInWithPassword", email, password).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderError,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// Map a provider error code (e.g. `EMAIL_EXISTS`) to a user-facing message.
///
/// Some codes carry a suffix such as `WEAK_PASSWORD : Password should be ...`.
pub fn friendly_message(code: &str) -> &'static str {
    let code = code.split(':').next().unwrap_or("").trim();
    match code {
        "EMAIL_EXISTS" => "An account with this email already exists.",
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Incorrect email or password."
        }
        "USER_DISABLED" => "This account has been disabled.",
        "WEAK_PASSWORD" => "Password should be at least 6 characters.",
        "INVALID_EMAIL" => "Please enter a valid email address.",
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Please try again later.",
        "OPERATION_NOT_ALLOWED" => "Email/password sign-in is not enabled.",
        _ => "Authentication failed.",
    }
}
