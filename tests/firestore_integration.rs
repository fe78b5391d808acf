// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running.
//! Set FIRESTORE_EMULATOR_HOST to point at it; otherwise they are skipped.
//!
//! Ids are unique per run so tests can share one emulator.

use chrono::Utc;
use recipe_share::db::RecipeStore;
use recipe_share::models::favorite::favorite_doc_id;
use recipe_share::models::{Favorite, NewRecipe};
use recipe_share::services::{FavoriteReconciler, RecipeResolver};
use std::sync::Arc;

mod common;
use common::{test_db, ScriptedMeals};

/// Generate a unique uid for test isolation.
fn unique_uid() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("uid-{}", nanos)
}

fn new_recipe(title: &str) -> NewRecipe {
    NewRecipe {
        title: title.to_string(),
        description: "Integration test recipe".to_string(),
        ingredients: "flour, water\nsalt".to_string(),
        youtube: Some("https://www.youtube.com/watch?v=xyz".to_string()),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RECIPE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_recipe_create_get_delete() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();

    let stored = new_recipe("Emulator Bread").into_stored(&uid, Utc::now());
    let id = db.create_recipe(&stored).await.unwrap();
    assert!(!id.is_empty());

    let fetched = db.get_recipe(&id).await.unwrap().expect("recipe exists");
    assert_eq!(fetched.id.as_deref(), Some(id.as_str()));
    assert_eq!(fetched.title, "Emulator Bread");
    assert_eq!(fetched.author, uid);
    assert_eq!(
        fetched.ingredients,
        Some(vec![
            "flour".to_string(),
            "water".to_string(),
            "salt".to_string()
        ])
    );

    let mine = db.recipes_by_author(&uid).await.unwrap();
    assert_eq!(mine.len(), 1);

    db.delete_recipe(&id).await.unwrap();
    assert!(db.get_recipe(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_recipes_includes_new_document() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let id = db
        .create_recipe(&new_recipe("Listed Soup").into_stored(&uid, Utc::now()))
        .await
        .unwrap();

    let all = db.list_recipes().await.unwrap();
    assert!(all.iter().any(|r| r.id.as_deref() == Some(id.as_str())));

    db.delete_recipe(&id).await.unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// FAVORITE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_favorite_put_find_delete() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let doc_id = favorite_doc_id(&uid, "52772");

    db.put_favorite(&doc_id, &Favorite::new(&uid, "52772", Utc::now()))
        .await
        .unwrap();

    let found = db.find_favorites(&uid, "52772").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id.as_deref(), Some(doc_id.as_str()));

    let fetched = db.get_favorite(&doc_id).await.unwrap().expect("exists");
    assert_eq!(fetched.uid, uid);
    assert_eq!(fetched.recipe_id, "52772");

    // Writing the same id again does not duplicate
    db.put_favorite(&doc_id, &Favorite::new(&uid, "52772", Utc::now()))
        .await
        .unwrap();
    assert_eq!(db.favorites_for_user(&uid).await.unwrap().len(), 1);

    db.delete_favorite(&doc_id).await.unwrap();
    assert!(db.find_favorites(&uid, "52772").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reconciler_toggle_against_emulator() {
    require_emulator!();

    let db = test_db().await;
    let uid = unique_uid();
    let store: Arc<dyn RecipeStore> = Arc::new(db.clone());
    let resolver = RecipeResolver::standard(Arc::new(ScriptedMeals::default()), store.clone());
    let favorites = FavoriteReconciler::new(store, resolver);

    // A legacy duplicate with a generated-style id
    db.put_favorite(&format!("legacy-{}", uid), &Favorite::new(&uid, "52772", Utc::now()))
        .await
        .unwrap();
    assert!(favorites.is_favorited(&uid, "52772").await.unwrap());

    // Toggling off clears every matching record
    assert!(!favorites.toggle(&uid, "52772").await.unwrap());
    assert!(db.find_favorites(&uid, "52772").await.unwrap().is_empty());

    assert!(favorites.toggle(&uid, "52772").await.unwrap());
    let found = db.find_favorites(&uid, "52772").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].id.as_deref(),
        Some(favorite_doc_id(&uid, "52772").as_str())
    );

    assert!(!favorites.toggle(&uid, "52772").await.unwrap());
}
