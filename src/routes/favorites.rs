// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite routes. All require a signed-in user.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::services::FavoriteEntry;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/favorites", get(list_favorites))
        .route("/api/favorites/{recipe_id}", get(favorite_status))
        .route("/api/favorites/{recipe_id}/toggle", post(toggle_favorite))
        .route("/api/favorites/entries/{favorite_id}", delete(remove_favorite))
}

#[derive(Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteEntry>,
    pub count: usize,
}

/// The caller's favorites, each resolved to its recipe.
async fn list_favorites(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<FavoritesResponse>> {
    let favorites = state.favorites.list(&user.uid).await?;
    Ok(Json(FavoritesResponse {
        count: favorites.len(),
        favorites,
    }))
}

#[derive(Serialize)]
pub struct FavoriteStatusResponse {
    pub recipe_id: String,
    pub favorited: bool,
}

async fn favorite_status(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(recipe_id): Path<String>,
) -> Result<Json<FavoriteStatusResponse>> {
    let favorited = state.favorites.is_favorited(&user.uid, &recipe_id).await?;
    Ok(Json(FavoriteStatusResponse {
        recipe_id,
        favorited,
    }))
}

/// Flip favorite state for a recipe that resolves in some source.
async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(recipe_id): Path<String>,
) -> Result<Json<FavoriteStatusResponse>> {
    let recipe = state.catalog.get(&recipe_id).await?;
    let recipe_id = recipe.recipe.id;

    let favorited = state.favorites.toggle(&user.uid, &recipe_id).await?;
    Ok(Json(FavoriteStatusResponse {
        recipe_id,
        favorited,
    }))
}

/// Remove a favorite by its record id (from the favorites list).
async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(favorite_id): Path<String>,
) -> Result<StatusCode> {
    state.favorites.remove(&user.uid, &favorite_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
