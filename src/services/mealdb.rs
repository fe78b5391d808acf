// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TheMealDB API client for keyword search and id lookup.

use crate::error::AppError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

/// Read-only source of meal records.
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Keyword search; an empty list means no matches.
    async fn search(&self, keyword: &str) -> Result<Vec<Meal>, AppError>;

    /// Lookup by the source-assigned id.
    async fn lookup(&self, id: &str) -> Result<Option<Meal>, AppError>;
}

/// TheMealDB API client.
#[derive(Clone)]
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a client against `base_url` (e.g. `https://www.themealdb.com/api/json/v1/1`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_meals(&self, endpoint: &str, param: (&str, &str)) -> Result<Vec<Meal>, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[param])
            .send()
            .await
            .map_err(|e| AppError::RecipeApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RecipeApi(format!("HTTP {}: {}", status, body)));
        }

        let body: MealsResponse = response
            .json()
            .await
            .map_err(|e| AppError::RecipeApi(format!("JSON parse error: {}", e)))?;

        Ok(body.meals.unwrap_or_default())
    }
}

#[async_trait]
impl MealSource for MealDbClient {
    async fn search(&self, keyword: &str) -> Result<Vec<Meal>, AppError> {
        let meals = self.get_meals("search.php", ("s", keyword)).await?;
        tracing::debug!(keyword, count = meals.len(), "Recipe API search");
        Ok(meals)
    }

    async fn lookup(&self, id: &str) -> Result<Option<Meal>, AppError> {
        let meals = self.get_meals("lookup.php", ("i", id)).await?;
        Ok(meals.into_iter().next())
    }
}

/// Envelope of every TheMealDB response. `meals` is null when nothing matched.
#[derive(Debug, Deserialize)]
pub struct MealsResponse {
    pub meals: Option<Vec<Meal>>,
}

/// Meal record as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Meal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    /// Remaining fields, including `strIngredientN` / `strMeasureN`.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Meal {
    /// Ingredient in 1-based `slot`, if present and not null.
    pub fn ingredient(&self, slot: usize) -> Option<&str> {
        self.slot_value("strIngredient", slot)
    }

    /// Measure in 1-based `slot`, if present and not null.
    pub fn measure(&self, slot: usize) -> Option<&str> {
        self.slot_value("strMeasure", slot)
    }

    fn slot_value(&self, prefix: &str, slot: usize) -> Option<&str> {
        self.extra
            .get(&format!("{}{}", prefix, slot))
            .and_then(|v| v.as_str())
    }
}
