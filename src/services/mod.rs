// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod favorites;
pub mod identity;
pub mod mealdb;
pub mod resolver;

pub use catalog::{RecipeCatalog, SearchResults};
pub use favorites::{FavoriteEntry, FavoriteReconciler};
pub use identity::{Identity, IdentityClient, IdentityProvider};
pub use mealdb::{Meal, MealDbClient, MealSource};
pub use resolver::RecipeResolver;
