// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Recipes (user-authored documents)
//! - Favorites (join collection of uid and recipe id)

use crate::db::{collections, RecipeStore};
use crate::error::AppError;
use crate::models::{Favorite, StoredRecipe};
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator does not check credentials; skip the ADC lookup entirely.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a disconnected client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

fn store_error(e: firestore::errors::FirestoreError) -> AppError {
    AppError::from_store(e.to_string())
}

#[async_trait]
impl RecipeStore for FirestoreDb {
    // ─── Recipe Operations ───────────────────────────────────────

    async fn create_recipe(&self, recipe: &StoredRecipe) -> Result<String, AppError> {
        let created: StoredRecipe = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::RECIPES)
            .generate_document_id()
            .object(recipe)
            .execute()
            .await
            .map_err(store_error)?;

        created
            .id
            .ok_or_else(|| AppError::Database("Created recipe has no document id".to_string()))
    }

    async fn get_recipe(&self, id: &str) -> Result<Option<StoredRecipe>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::RECIPES)
            .obj()
            .one(id)
            .await
            .map_err(store_error)
    }

    async fn list_recipes(&self) -> Result<Vec<StoredRecipe>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::RECIPES)
            .obj()
            .query()
            .await
            .map_err(store_error)
    }

    async fn recipes_by_author(&self, uid: &str) -> Result<Vec<StoredRecipe>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::RECIPES)
            .filter(|q| q.for_all([q.field("author").eq(uid)]))
            .obj()
            .query()
            .await
            .map_err(store_error)
    }

    async fn delete_recipe(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::RECIPES)
            .document_id(id)
            .execute()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    // ─── Favorite Operations ─────────────────────────────────────

    async fn find_favorites(
        &self,
        uid: &str,
        recipe_id: &str,
    ) -> Result<Vec<Favorite>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITES)
            .filter(|q| {
                q.for_all([
                    q.field("uid").eq(uid),
                    q.field("recipeId").eq(recipe_id),
                ])
            })
            .obj()
            .query()
            .await
            .map_err(store_error)
    }

    async fn favorites_for_user(&self, uid: &str) -> Result<Vec<Favorite>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::FAVORITES)
            .filter(|q| q.for_all([q.field("uid").eq(uid)]))
            .obj()
            .query()
            .await
            .map_err(store_error)
    }

    async fn get_favorite(&self, id: &str) -> Result<Option<Favorite>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::FAVORITES)
            .obj()
            .one(id)
            .await
            .map_err(store_error)
    }

    async fn put_favorite(&self, id: &str, favorite: &Favorite) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::FAVORITES)
            .document_id(id)
            .object(favorite)
            .execute()
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn delete_favorite(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::FAVORITES)
            .document_id(id)
            .execute()
            .await
            .map_err(store_error)?;
        Ok(())
    }
}
