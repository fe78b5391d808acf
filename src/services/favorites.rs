// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favorite reconciliation: status, toggle, listing and removal of the
//! `(uid, recipe_id)` join records.

use crate::db::RecipeStore;
use crate::error::AppError;
use crate::models::favorite::favorite_doc_id;
use crate::models::{Favorite, ResolvedRecipe};
use crate::services::resolver::RecipeResolver;
use dashmap::DashMap;
use futures_util::{stream, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Favorites resolved concurrently when listing.
const MAX_CONCURRENT_RESOLVES: usize = 8;

/// Per-pair locks serializing toggles.
pub type ToggleLocks = Arc<DashMap<(String, String), Arc<Mutex<()>>>>;

/// One caller's share of a per-pair toggle lock.
///
/// Dropping it removes the map entry once no other caller holds or waits on
/// the lock, including when the toggle future is cancelled mid-way.
struct ToggleLockEntry {
    locks: ToggleLocks,
    key: (String, String),
    lock: Arc<Mutex<()>>,
}

impl ToggleLockEntry {
    fn acquire(locks: &ToggleLocks, uid: &str, recipe_id: &str) -> Self {
        let key = (uid.to_string(), recipe_id.to_string());
        let lock = locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        Self {
            locks: locks.clone(),
            key,
            lock,
        }
    }
}

impl Drop for ToggleLockEntry {
    fn drop(&mut self) {
        // The map and this entry account for two references.
        self.locks
            .remove_if(&self.key, |_, l| Arc::strong_count(l) <= 2);
    }
}

/// A favorite with its recipe resolved.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteEntry {
    /// Join record id, used to remove the favorite
    pub favorite_id: String,
    #[serde(flatten)]
    pub recipe: ResolvedRecipe,
}

#[derive(Clone)]
pub struct FavoriteReconciler {
    store: Arc<dyn RecipeStore>,
    resolver: RecipeResolver,
    toggle_locks: ToggleLocks,
}

impl FavoriteReconciler {
    pub fn new(store: Arc<dyn RecipeStore>, resolver: RecipeResolver) -> Self {
        Self {
            store,
            resolver,
            toggle_locks: Arc::new(DashMap::new()),
        }
    }

    /// Whether `uid` has favorited `recipe_id`.
    pub async fn is_favorited(&self, uid: &str, recipe_id: &str) -> Result<bool, AppError> {
        Ok(!self.store.find_favorites(uid, recipe_id).await?.is_empty())
    }

    /// Flip the favorite state and return the new state.
    ///
    /// Toggles on the same pair are serialized in this process, and new
    /// records use a deterministic id so concurrent writers from other
    /// processes land on the same document. Turning a favorite off removes
    /// every matching record, including legacy ones with generated ids.
    pub async fn toggle(&self, uid: &str, recipe_id: &str) -> Result<bool, AppError> {
        let entry = ToggleLockEntry::acquire(&self.toggle_locks, uid, recipe_id);
        let _guard = entry.lock.lock().await;
        self.toggle_locked(uid, recipe_id).await
    }

    async fn toggle_locked(&self, uid: &str, recipe_id: &str) -> Result<bool, AppError> {
        let existing = self.store.find_favorites(uid, recipe_id).await?;

        if existing.is_empty() {
            let favorite = Favorite::new(uid, recipe_id, chrono::Utc::now());
            self.store
                .put_favorite(&favorite_doc_id(uid, recipe_id), &favorite)
                .await?;
            tracing::info!(uid, recipe_id, "Favorite added");
            return Ok(true);
        }

        if existing.len() > 1 {
            tracing::warn!(
                uid,
                recipe_id,
                count = existing.len(),
                "Duplicate favorite records found, removing all"
            );
        }

        for favorite in &existing {
            if let Some(id) = favorite.id.as_deref() {
                self.store.delete_favorite(id).await?;
            }
        }
        tracing::info!(uid, recipe_id, "Favorite removed");
        Ok(false)
    }

    /// All favorites of `uid` with their recipes, in store order.
    ///
    /// Favorites whose recipe resolves nowhere are skipped.
    pub async fn list(&self, uid: &str) -> Result<Vec<FavoriteEntry>, AppError> {
        let favorites = self.store.favorites_for_user(uid).await?;
        let total = favorites.len();

        let entries: Vec<FavoriteEntry> = stream::iter(favorites)
            .map(|favorite| async move {
                let favorite_id = favorite.id?;
                let recipe = self.resolver.resolve(&favorite.recipe_id).await?;
                Some(FavoriteEntry {
                    favorite_id,
                    recipe,
                })
            })
            .buffered(MAX_CONCURRENT_RESOLVES)
            .filter_map(|entry| async move { entry })
            .collect()
            .await;

        if entries.len() < total {
            tracing::debug!(
                uid,
                total,
                resolved = entries.len(),
                "Some favorites no longer resolve"
            );
        }

        Ok(entries)
    }

    /// Remove one favorite record by id. Only its owner may remove it.
    pub async fn remove(&self, uid: &str, favorite_id: &str) -> Result<(), AppError> {
        match self.store.get_favorite(favorite_id).await? {
            Some(favorite) if favorite.uid == uid => {
                self.store.delete_favorite(favorite_id).await?;
                tracing::info!(uid, favorite_id, "Favorite removed by id");
                Ok(())
            }
            _ => Err(AppError::NotFound(format!("Favorite {}", favorite_id))),
        }
    }
}
