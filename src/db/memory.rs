// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process recipe store for local development and tests.

use crate::db::RecipeStore;
use crate::error::AppError;
use crate::models::{Favorite, StoredRecipe};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Store backed by concurrent maps. Cloning shares the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    recipes: DashMap<String, StoredRecipe>,
    favorites: DashMap<String, Favorite>,
    next_id: AtomicU64,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of favorite documents currently stored.
    pub fn favorite_count(&self) -> usize {
        self.inner.favorites.len()
    }

    /// Number of recipe documents currently stored.
    pub fn recipe_count(&self) -> usize {
        self.inner.recipes.len()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Database("Memory store unavailable".to_string()));
        }
        Ok(())
    }

    fn generate_id(&self) -> String {
        let n = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("mem{:017}", n)
    }

    fn collect_recipes<F>(&self, keep: F) -> Vec<StoredRecipe>
    where
        F: Fn(&StoredRecipe) -> bool,
    {
        let mut recipes: Vec<StoredRecipe> = self
            .inner
            .recipes
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        recipes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        recipes
    }

    fn collect_favorites<F>(&self, keep: F) -> Vec<Favorite>
    where
        F: Fn(&Favorite) -> bool,
    {
        let mut favorites: Vec<Favorite> = self
            .inner
            .favorites
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        favorites.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        favorites
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn create_recipe(&self, recipe: &StoredRecipe) -> Result<String, AppError> {
        self.check()?;
        let id = self.generate_id();
        let mut stored = recipe.clone();
        stored.id = Some(id.clone());
        self.inner.recipes.insert(id.clone(), stored);
        Ok(id)
    }

    async fn get_recipe(&self, id: &str) -> Result<Option<StoredRecipe>, AppError> {
        self.check()?;
        Ok(self.inner.recipes.get(id).map(|r| r.value().clone()))
    }

    async fn list_recipes(&self) -> Result<Vec<StoredRecipe>, AppError> {
        self.check()?;
        Ok(self.collect_recipes(|_| true))
    }

    async fn recipes_by_author(&self, uid: &str) -> Result<Vec<StoredRecipe>, AppError> {
        self.check()?;
        Ok(self.collect_recipes(|r| r.author == uid))
    }

    async fn delete_recipe(&self, id: &str) -> Result<(), AppError> {
        self.check()?;
        self.inner.recipes.remove(id);
        Ok(())
    }

    async fn find_favorites(
        &self,
        uid: &str,
        recipe_id: &str,
    ) -> Result<Vec<Favorite>, AppError> {
        self.check()?;
        Ok(self.collect_favorites(|f| f.uid == uid && f.recipe_id == recipe_id))
    }

    async fn favorites_for_user(&self, uid: &str) -> Result<Vec<Favorite>, AppError> {
        self.check()?;
        Ok(self.collect_favorites(|f| f.uid == uid))
    }

    async fn get_favorite(&self, id: &str) -> Result<Option<Favorite>, AppError> {
        self.check()?;
        Ok(self.inner.favorites.get(id).map(|f| f.value().clone()))
    }

    async fn put_favorite(&self, id: &str, favorite: &Favorite) -> Result<(), AppError> {
        self.check()?;
        let mut stored = favorite.clone();
        stored.id = Some(id.to_string());
        self.inner.favorites.insert(id.to_string(), stored);
        Ok(())
    }

    async fn delete_favorite(&self, id: &str) -> Result<(), AppError> {
        self.check()?;
        self.inner.favorites.remove(id);
        Ok(())
    }
}
