// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Recipe models: the normalized shape shared by both sources, the stored
//! document, and the authoring form.

use crate::services::mealdb::Meal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image used for user recipes (there is no upload).
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x250?text=No+Image";

/// Author shown for external recipes without an area.
pub const EXTERNAL_AUTHOR: &str = "TheMealDB";

/// Number of ingredient/measure slots in a meal record.
pub const INGREDIENT_SLOTS: usize = 20;

/// Which backing source answered for a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeOrigin {
    /// The public recipe API
    External,
    /// A user-authored recipe document
    Store,
}

/// Normalized recipe, rebuilt per fetch from whichever source answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    /// Description or cooking instructions
    pub description: String,
    /// HTTPS image URL (may be empty)
    pub image: String,
    pub ingredients: Vec<String>,
    /// Owner uid for stored recipes, area or source name otherwise
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

/// A recipe tagged with the source that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub source: RecipeOrigin,
}

impl Recipe {
    /// Map a meal record from the public API.
    pub fn from_meal(meal: &Meal) -> Self {
        let area = non_blank(meal.area.as_deref());
        Self {
            id: meal.id.clone(),
            title: meal.name.clone(),
            description: meal.instructions.clone().unwrap_or_default(),
            image: secure_image_url(meal.thumbnail.as_deref().unwrap_or("")),
            ingredients: meal_ingredients(meal),
            author: area.clone().unwrap_or_else(|| EXTERNAL_AUTHOR.to_string()),
            youtube: non_blank(meal.youtube.as_deref()),
            category: non_blank(meal.category.as_deref()),
            area,
        }
    }

    /// Map a stored document, defaulting fields older documents may lack.
    pub fn from_stored(id: &str, stored: &StoredRecipe) -> Self {
        Self {
            id: id.to_string(),
            title: stored.title.clone(),
            description: stored.description.clone(),
            image: stored.image.clone().unwrap_or_default(),
            ingredients: stored.ingredients.clone().unwrap_or_default(),
            author: stored.author.clone(),
            youtube: non_blank(stored.youtube.as_deref()),
            category: non_blank(stored.category.as_deref()),
            area: non_blank(Some(&stored.author)),
        }
    }

    /// Case-insensitive substring match against title or description.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// Collect non-blank ingredient slots 1..=20 as `"ingredient - measure"`.
pub fn meal_ingredients(meal: &Meal) -> Vec<String> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let ingredient = meal.ingredient(slot)?;
            if ingredient.trim().is_empty() {
                return None;
            }
            let measure = meal.measure(slot).unwrap_or("");
            Some(format!("{} - {}", ingredient, measure))
        })
        .collect()
}

/// Force an `http:` image URL onto `https:`.
pub fn secure_image_url(url: &str) -> String {
    match url.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http:") => format!("https:{}", &url[5..]),
        _ => url.to_string(),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// User recipe document in the `recipes` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecipe {
    /// Document ID (filled on read, never written as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Owner uid
    pub author: String,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Recipe submission from a signed-in user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free text, one ingredient per line or comma separated
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub youtube: Option<String>,
}

impl NewRecipe {
    /// Check required fields; nothing is written when this fails.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err("Title & description required.");
        }
        Ok(())
    }

    /// Build the document to store for `author`.
    pub fn into_stored(self, author: &str, now: DateTime<Utc>) -> StoredRecipe {
        StoredRecipe {
            id: None,
            ingredients: Some(parse_ingredients(&self.ingredients)),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image: Some(PLACEHOLDER_IMAGE.to_string()),
            author: author.to_string(),
            youtube: self.youtube.map(|y| y.trim().to_string()),
            category: None,
            created_at: now,
        }
    }
}

/// Split ingredient text on newlines or commas, dropping blanks.
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
