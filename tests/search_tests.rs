// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Listing and search with fallback to user recipes.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use common::{body_json, create_test_app, meal};
use recipe_share::db::RecipeStore;
use recipe_share::models::NewRecipe;
use std::sync::atomic::Ordering;
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn seed_store_recipe(app: &common::TestApp, title: &str, description: &str) {
    let form = NewRecipe {
        title: title.to_string(),
        description: description.to_string(),
        ..Default::default()
    };
    app.store
        .create_recipe(&form.into_stored("uid-baker", Utc::now()))
        .await
        .unwrap();
}

fn titles(json: &serde_json::Value) -> Vec<String> {
    json["recipes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_default_listing_uses_default_query() {
    let app = create_test_app(vec![
        meal("1", "Chicken Handi", &[("chicken", "1kg")]),
        meal("2", "Beef Wellington", &[("beef", "1kg")]),
    ]);

    let response = app.router.oneshot(get("/api/recipes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["mode"], "external");
    assert_eq!(titles(&json), vec!["Chicken Handi"]);
}

#[tokio::test]
async fn test_blank_query_is_default_listing() {
    let app = create_test_app(vec![meal("1", "Chicken Handi", &[])]);

    let response = app.router.oneshot(get("/api/recipes?q=%20%20")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["mode"], "external");
    assert_eq!(titles(&json), vec!["Chicken Handi"]);
}

#[tokio::test]
async fn test_external_hit_skips_store() {
    let app = create_test_app(vec![meal("52772", "Teriyaki Chicken Casserole", &[])]);
    // Any store access would now fail the request
    app.store.set_unavailable(true);

    let response = app
        .router
        .oneshot(get("/api/recipes?q=teriyaki"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["mode"], "external");
    assert_eq!(titles(&json), vec!["Teriyaki Chicken Casserole"]);
    assert_eq!(json["recipes"][0]["id"], "52772");
}

#[tokio::test]
async fn test_zero_external_hits_fall_back_to_store() {
    let app = create_test_app(vec![meal("52772", "Teriyaki Chicken Casserole", &[])]);
    seed_store_recipe(&app, "Zucchini Bread", "Moist and sweet").await;
    seed_store_recipe(&app, "Lentil Soup", "Hearty, with zucchini").await;
    seed_store_recipe(&app, "Pancakes", "Fluffy").await;

    let response = app
        .router
        .oneshot(get("/api/recipes?q=ZUCCHINI"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["mode"], "store");
    // Matches on title or description, never merged with API results
    assert_eq!(titles(&json), vec!["Zucchini Bread", "Lentil Soup"]);
}

#[tokio::test]
async fn test_no_match_anywhere_is_empty_store_result() {
    let app = create_test_app(vec![meal("52772", "Teriyaki Chicken Casserole", &[])]);
    seed_store_recipe(&app, "Zucchini Bread", "Moist and sweet").await;

    let response = app
        .router
        .oneshot(get("/api/recipes?q=zzz_no_match"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["mode"], "store");
    assert!(json["recipes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_outage_is_bad_gateway() {
    let app = create_test_app(vec![]);
    app.meals.set_failing(true);

    let response = app
        .router
        .oneshot(get("/api/recipes?q=chicken"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "recipe_api_error");
    assert_eq!(app.meals.searches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_overlong_query_rejected() {
    let app = create_test_app(vec![]);
    let query = "a".repeat(101);

    let response = app
        .router
        .oneshot(get(&format!("/api/recipes?q={}", query)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.meals.searches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_query_limit_counts_characters() {
    let app = create_test_app(vec![]);
    // 60 two-byte characters: 120 bytes, within the limit
    let query = urlencoding::encode(&"é".repeat(60)).into_owned();

    let response = app
        .router
        .oneshot(get(&format!("/api/recipes?q={}", query)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(app.meals.searches.load(Ordering::SeqCst), 1);
}
