// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recipe-Share: browse public recipes, publish your own, keep favorites.
//!
//! This crate provides the backend API. Default recipe content comes from
//! TheMealDB; user recipes and favorites live in Firestore; accounts are
//! held by the Identity Toolkit.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::RecipeStore;
use services::{FavoriteReconciler, IdentityProvider, MealSource, RecipeCatalog, RecipeResolver};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub catalog: RecipeCatalog,
    pub favorites: FavoriteReconciler,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Wire services over the given recipe source, store and identity provider.
    pub fn new(
        config: Config,
        source: Arc<dyn MealSource>,
        store: Arc<dyn RecipeStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let resolver = RecipeResolver::standard(source.clone(), store.clone());
        let catalog = RecipeCatalog::new(
            source,
            store.clone(),
            resolver.clone(),
            config.default_query.clone(),
        );
        let favorites = FavoriteReconciler::new(store, resolver);

        Self {
            config,
            catalog,
            favorites,
            identity,
        }
    }
}
