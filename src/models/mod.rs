// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod favorite;
pub mod recipe;

pub use favorite::Favorite;
pub use recipe::{NewRecipe, Recipe, RecipeOrigin, ResolvedRecipe, StoredRecipe};
