// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Default TheMealDB endpoint (free public key).
pub const DEFAULT_MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Default Identity Toolkit endpoint used for email/password auth.
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Keyword used for the home page listing.
pub const DEFAULT_QUERY: &str = "chicken";

/// Which backend holds user recipes and favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    /// In-process store; data is lost on restart.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("STORE_BACKEND")),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL (allowed CORS origin)
    pub frontend_url: String,
    /// GCP project ID hosting Firestore
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// TheMealDB base URL
    pub mealdb_base_url: String,
    /// Identity Toolkit base URL
    pub identity_base_url: String,
    /// Keyword for the default listing
    pub default_query: String,
    pub store_backend: StoreBackend,

    // --- Secrets ---
    /// Firebase web API key for the Identity Toolkit
    pub firebase_api_key: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            mealdb_base_url: env::var("MEALDB_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_MEALDB_BASE_URL.to_string()),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_IDENTITY_BASE_URL.to_string()),
            default_query: env::var("DEFAULT_QUERY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_QUERY.to_string()),
            store_backend: env::var("STORE_BACKEND")
                .ok()
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or(StoreBackend::Firestore),

            firebase_api_key: env::var("FIREBASE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_API_KEY"))?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            mealdb_base_url: DEFAULT_MEALDB_BASE_URL.to_string(),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
            default_query: DEFAULT_QUERY.to_string(),
            store_backend: StoreBackend::Memory,
            firebase_api_key: "test_api_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
