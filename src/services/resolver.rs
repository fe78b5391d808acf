// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe id resolution across sources that share no key space.
//!
//! Lookups run in a fixed priority order and the first hit wins. A failing
//! source counts as a miss so the next one still gets a chance.

use crate::db::RecipeStore;
use crate::error::AppError;
use crate::models::{Recipe, RecipeOrigin, ResolvedRecipe};
use crate::services::mealdb::MealSource;
use async_trait::async_trait;
use std::sync::Arc;

/// One place a recipe id may live.
#[async_trait]
pub trait RecipeLookup: Send + Sync {
    fn origin(&self) -> RecipeOrigin;

    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, AppError>;
}

/// Lookup against the public recipe API.
pub struct ExternalLookup {
    source: Arc<dyn MealSource>,
}

impl ExternalLookup {
    pub fn new(source: Arc<dyn MealSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl RecipeLookup for ExternalLookup {
    fn origin(&self) -> RecipeOrigin {
        RecipeOrigin::External
    }

    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, AppError> {
        Ok(self
            .source
            .lookup(id)
            .await?
            .map(|meal| Recipe::from_meal(&meal)))
    }
}

/// Lookup of a user recipe document by id.
pub struct StoreLookup {
    store: Arc<dyn RecipeStore>,
}

impl StoreLookup {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RecipeLookup for StoreLookup {
    fn origin(&self) -> RecipeOrigin {
        RecipeOrigin::Store
    }

    async fn lookup(&self, id: &str) -> Result<Option<Recipe>, AppError> {
        Ok(self
            .store
            .get_recipe(id)
            .await?
            .map(|stored| Recipe::from_stored(id, &stored)))
    }
}

/// Resolves an opaque recipe id against an ordered list of lookups.
#[derive(Clone)]
pub struct RecipeResolver {
    lookups: Vec<Arc<dyn RecipeLookup>>,
}

impl RecipeResolver {
    /// Resolver with an explicit priority order.
    pub fn new(lookups: Vec<Arc<dyn RecipeLookup>>) -> Self {
        Self { lookups }
    }

    /// Public API first, then the user store.
    pub fn standard(source: Arc<dyn MealSource>, store: Arc<dyn RecipeStore>) -> Self {
        let external: Arc<dyn RecipeLookup> = Arc::new(ExternalLookup::new(source));
        let stored: Arc<dyn RecipeLookup> = Arc::new(StoreLookup::new(store));
        Self::new(vec![external, stored])
    }

    /// Resolve `id`, or `None` when no source knows it.
    pub async fn resolve(&self, id: &str) -> Option<ResolvedRecipe> {
        for lookup in &self.lookups {
            match lookup.lookup(id).await {
                Ok(Some(recipe)) => {
                    tracing::debug!(recipe_id = id, source = ?lookup.origin(), "Recipe resolved");
                    return Some(ResolvedRecipe {
                        recipe,
                        source: lookup.origin(),
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        recipe_id = id,
                        source = ?lookup.origin(),
                        error = %e,
                        "Recipe lookup failed, trying next source"
                    );
                }
            }
        }

        tracing::debug!(recipe_id = id, "Recipe not found in any source");
        None
    }
}
