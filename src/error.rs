// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not allowed: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Permission denied by the recipe store: {0}")]
    PermissionDenied(String),

    #[error("Recipe API error: {0}")]
    RecipeApi(String),

    #[error("Auth provider error: {0}")]
    AuthProvider(String),

    #[error("Auth provider unavailable: {0}")]
    AuthUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build a store error, singling out permission-denied responses.
    pub fn from_store(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("PERMISSION_DENIED") || message.contains("PermissionDenied") {
            AppError::PermissionDenied(message)
        } else {
            AppError::Database(message)
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", Some(msg.clone())),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::PermissionDenied(msg) => {
                tracing::warn!(error = %msg, "Store rejected request");
                (
                    StatusCode::FORBIDDEN,
                    "permission_denied",
                    Some("You do not have permission to access this data. Try signing in again.".to_string()),
                )
            }
            AppError::RecipeApi(msg) => {
                tracing::error!(error = %msg, "Recipe API error");
                (
                    StatusCode::BAD_GATEWAY,
                    "recipe_api_error",
                    Some("Recipes are unavailable right now. Please try again later.".to_string()),
                )
            }
            AppError::AuthProvider(msg) => {
                (StatusCode::BAD_REQUEST, "auth_error", Some(msg.clone()))
            }
            AppError::AuthUnavailable(msg) => {
                tracing::error!(error = %msg, "Auth provider unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    "auth_unavailable",
                    Some("Sign-in is unavailable right now. Please try again later.".to_string()),
                )
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
