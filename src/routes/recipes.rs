// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe listing, detail and authoring routes.

use crate::error::Result;
use crate::middleware::auth::{AuthUser, Session};
use crate::models::{NewRecipe, Recipe, ResolvedRecipe};
use crate::services::SearchResults;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Longest accepted search query, in characters.
const MAX_QUERY_LEN: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route("/api/recipes/{id}", get(get_recipe).delete(delete_recipe))
        .route("/api/my-recipes", get(my_recipes))
}

// ─── Listing / Search ────────────────────────────────────────

#[derive(Deserialize)]
struct SearchQuery {
    /// Search keyword; absent or blank means the default listing
    #[serde(default)]
    q: Option<String>,
}

/// Home page listing, or search results when `q` is given.
async fn list_recipes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults>> {
    let results = match params.q.as_deref() {
        Some(q) if q.chars().count() > MAX_QUERY_LEN => {
            return Err(crate::error::AppError::BadRequest(format!(
                "Query must be at most {} characters",
                MAX_QUERY_LEN
            )));
        }
        Some(q) => state.catalog.search(q).await?,
        None => state.catalog.default_listing().await?,
    };

    Ok(Json(results))
}

// ─── Detail ──────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: ResolvedRecipe,
    /// Present only for signed-in callers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorited: Option<bool>,
}

/// Resolve a recipe by id from whichever source knows it.
async fn get_recipe(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<RecipeDetailResponse>> {
    let recipe = state.catalog.get(&id).await?;

    let favorited = match session.user() {
        Some(user) => {
            let status = state
                .favorites
                .is_favorited(&user.uid, &recipe.recipe.id)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, recipe_id = %id, "Failed to check favorite");
                    false
                });
            Some(status)
        }
        None => None,
    };

    Ok(Json(RecipeDetailResponse { recipe, favorited }))
}

// ─── Authoring ───────────────────────────────────────────────

/// Create a recipe owned by the caller.
///
/// The created recipe is returned so the client can add it to its list
/// without re-fetching.
async fn create_recipe(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(form): Json<NewRecipe>,
) -> Result<(StatusCode, Json<Recipe>)> {
    let recipe = state.catalog.create(&user.uid, form).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Delete one of the caller's recipes.
async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.catalog.delete(&user.uid, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct MyRecipesResponse {
    pub recipes: Vec<Recipe>,
    pub count: usize,
}

/// Recipes authored by the caller.
async fn my_recipes(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<Json<MyRecipesResponse>> {
    let recipes = state.catalog.my_recipes(&user.uid).await?;
    Ok(Json(MyRecipesResponse {
        count: recipes.len(),
        recipes,
    }))
}
