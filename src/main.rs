// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe-Share API Server
//!
//! Serves public recipes from TheMealDB alongside user-authored recipes and
//! favorites kept in Firestore.

use recipe_share::{
    config::{Config, StoreBackend},
    db::{FirestoreDb, MemoryStore, RecipeStore},
    services::{IdentityClient, MealDbClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Recipe-Share API");

    let store: Arc<dyn RecipeStore> = match config.store_backend {
        StoreBackend::Firestore => Arc::new(FirestoreDb::new(&config.gcp_project_id).await?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory recipe store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let recipes = Arc::new(MealDbClient::new(config.mealdb_base_url.clone()));
    tracing::info!(base_url = %config.mealdb_base_url, "Recipe API client initialized");

    let identity = Arc::new(IdentityClient::new(
        config.identity_base_url.clone(),
        config.firebase_api_key.clone(),
    ));

    let state = Arc::new(AppState::new(config.clone(), recipes, store, identity));

    // Build router
    let app = recipe_share::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("recipe_share=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
