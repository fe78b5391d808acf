// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe listing, search and authoring.

use crate::db::RecipeStore;
use crate::error::AppError;
use crate::models::{NewRecipe, Recipe, RecipeOrigin, ResolvedRecipe};
use crate::services::mealdb::MealSource;
use crate::services::resolver::RecipeResolver;
use serde::Serialize;
use std::sync::Arc;

/// Recipes for a listing plus the source that answered.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub mode: RecipeOrigin,
    pub recipes: Vec<Recipe>,
}

#[derive(Clone)]
pub struct RecipeCatalog {
    source: Arc<dyn MealSource>,
    store: Arc<dyn RecipeStore>,
    resolver: RecipeResolver,
    default_query: String,
}

impl RecipeCatalog {
    pub fn new(
        source: Arc<dyn MealSource>,
        store: Arc<dyn RecipeStore>,
        resolver: RecipeResolver,
        default_query: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            resolver,
            default_query: default_query.into(),
        }
    }

    /// Home page listing from the public API.
    pub async fn default_listing(&self) -> Result<SearchResults, AppError> {
        let recipes = self.search_external(&self.default_query).await?;
        Ok(SearchResults {
            mode: RecipeOrigin::External,
            recipes,
        })
    }

    /// Search the public API; only when it has no match, scan user recipes.
    ///
    /// Results from the two sources are never merged.
    pub async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
        if query.trim().is_empty() {
            return self.default_listing().await;
        }

        let recipes = self.search_external(query).await?;
        if !recipes.is_empty() {
            return Ok(SearchResults {
                mode: RecipeOrigin::External,
                recipes,
            });
        }

        let recipes: Vec<Recipe> = self
            .store
            .list_recipes()
            .await?
            .iter()
            .filter_map(|stored| {
                let id = stored.id.as_deref()?;
                Some(Recipe::from_stored(id, stored))
            })
            .filter(|recipe| recipe.matches_query(query))
            .collect();

        tracing::debug!(query, count = recipes.len(), "Search fell back to stored recipes");

        Ok(SearchResults {
            mode: RecipeOrigin::Store,
            recipes,
        })
    }

    async fn search_external(&self, query: &str) -> Result<Vec<Recipe>, AppError> {
        let meals = self.source.search(query).await?;
        Ok(meals.iter().map(Recipe::from_meal).collect())
    }

    /// Resolve a recipe id for the detail view.
    pub async fn get(&self, id: &str) -> Result<ResolvedRecipe, AppError> {
        if id.trim().is_empty() {
            return Err(AppError::BadRequest("Recipe id is required".to_string()));
        }
        self.resolver
            .resolve(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Recipe {}", id)))
    }

    /// Store a new recipe authored by `uid`.
    ///
    /// Validation happens before any write.
    pub async fn create(&self, uid: &str, form: NewRecipe) -> Result<Recipe, AppError> {
        form.validate()
            .map_err(|msg| AppError::BadRequest(msg.to_string()))?;

        let stored = form.into_stored(uid, chrono::Utc::now());
        let id = self.store.create_recipe(&stored).await?;

        tracing::info!(uid, recipe_id = %id, "Recipe created");
        Ok(Recipe::from_stored(&id, &stored))
    }

    /// Recipes authored by `uid`.
    pub async fn my_recipes(&self, uid: &str) -> Result<Vec<Recipe>, AppError> {
        Ok(self
            .store
            .recipes_by_author(uid)
            .await?
            .iter()
            .filter_map(|stored| {
                let id = stored.id.as_deref()?;
                Some(Recipe::from_stored(id, stored))
            })
            .collect())
    }

    /// Delete a recipe owned by `uid`.
    pub async fn delete(&self, uid: &str, recipe_id: &str) -> Result<(), AppError> {
        let stored = self
            .store
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe {}", recipe_id)))?;

        if stored.author != uid {
            tracing::warn!(uid, recipe_id, "Refusing to delete another user's recipe");
            return Err(AppError::Forbidden(
                "Only the author can delete this recipe".to_string(),
            ));
        }

        self.store.delete_recipe(recipe_id).await?;
        tracing::info!(uid, recipe_id, "Recipe deleted");
        Ok(())
    }
}
