// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: the `RecipeStore` seam with Firestore and in-memory backends.

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Favorite, StoredRecipe};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// User-authored recipes (generated document ids)
    pub const RECIPES: &str = "recipes";
    /// Favorite join records
    pub const FAVORITES: &str = "favorites";
}

/// Operations consumed from the document store.
///
/// Documents returned by reads always carry their `id`.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Insert a recipe under a generated id and return that id.
    async fn create_recipe(&self, recipe: &StoredRecipe) -> Result<String, AppError>;

    async fn get_recipe(&self, id: &str) -> Result<Option<StoredRecipe>, AppError>;

    /// Every recipe in the collection (search fallback scans this).
    async fn list_recipes(&self) -> Result<Vec<StoredRecipe>, AppError>;

    async fn recipes_by_author(&self, uid: &str) -> Result<Vec<StoredRecipe>, AppError>;

    async fn delete_recipe(&self, id: &str) -> Result<(), AppError>;

    /// Favorites matching both `uid` and `recipe_id`.
    async fn find_favorites(&self, uid: &str, recipe_id: &str)
        -> Result<Vec<Favorite>, AppError>;

    async fn favorites_for_user(&self, uid: &str) -> Result<Vec<Favorite>, AppError>;

    async fn get_favorite(&self, id: &str) -> Result<Option<Favorite>, AppError>;

    /// Create or overwrite the favorite stored under `id`.
    async fn put_favorite(&self, id: &str, favorite: &Favorite) -> Result<(), AppError>;

    async fn delete_favorite(&self, id: &str) -> Result<(), AppError>;
}
