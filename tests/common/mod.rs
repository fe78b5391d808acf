// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Response;
use recipe_share::config::Config;
use recipe_share::db::{FirestoreDb, MemoryStore, RecipeStore};
use recipe_share::error::AppError;
use recipe_share::routes::create_router;
use recipe_share::services::{Identity, IdentityProvider, Meal, MealSource};
use recipe_share::AppState;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Build a meal record the way TheMealDB returns it.
#[allow(dead_code)]
pub fn meal(id: &str, name: &str, ingredients: &[(&str, &str)]) -> Meal {
    let mut value = serde_json::json!({
        "idMeal": id,
        "strMeal": name,
        "strInstructions": format!("How to make {}", name),
        "strMealThumb": format!("http://www.themealdb.com/images/{}.jpg", id),
        "strCategory": "Chicken",
        "strArea": "Japanese",
        "strYoutube": "https://www.youtube.com/watch?v=abc",
    });

    for slot in 1..=20 {
        let (ingredient, measure) = ingredients.get(slot - 1).copied().unwrap_or(("", ""));
        value[format!("strIngredient{}", slot)] = ingredient.into();
        value[format!("strMeasure{}", slot)] = measure.into();
    }

    serde_json::from_value(value).expect("valid meal")
}

/// In-memory stand-in for TheMealDB.
///
/// Search is a case-insensitive substring match on the meal name.
#[derive(Default)]
pub struct ScriptedMeals {
    meals: Mutex<Vec<Meal>>,
    failing: AtomicBool,
    pub searches: AtomicUsize,
    pub lookups: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedMeals {
    pub fn with_meals(meals: Vec<Meal>) -> Self {
        Self {
            meals: Mutex::new(meals),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::RecipeApi("HTTP 503: unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MealSource for ScriptedMeals {
    async fn search(&self, keyword: &str) -> Result<Vec<Meal>, AppError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let needle = keyword.to_lowercase();
        Ok(self
            .meals
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn lookup(&self, id: &str) -> Result<Option<Meal>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self
            .meals
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }
}

/// Identity provider accepting one known account.
pub struct FakeIdentity;

#[allow(dead_code)]
pub const TEST_EMAIL: &str = "cook@example.com";
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "hunter22";
#[allow(dead_code)]
pub const TEST_UID: &str = "uid-cook";
/// Signing in with this email behaves as if the provider were down.
#[allow(dead_code)]
pub const OUTAGE_EMAIL: &str = "outage@example.com";

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<Identity, AppError> {
        if email == TEST_EMAIL {
            return Err(AppError::AuthProvider(
                "An account with this email already exists.".to_string(),
            ));
        }
        Ok(Identity {
            uid: format!("uid-{}", email.split('@').next().unwrap_or("new")),
            email: email.to_string(),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AppError> {
        if email == OUTAGE_EMAIL {
            return Err(AppError::AuthUnavailable(
                "signInWithPassword: HTTP 503".to_string(),
            ));
        }
        if email == TEST_EMAIL && password == TEST_PASSWORD {
            return Ok(Identity {
                uid: TEST_UID.to_string(),
                email: email.to_string(),
            });
        }
        Err(AppError::AuthProvider(
            "Incorrect email or password.".to_string(),
        ))
    }
}

/// Everything a route test needs to poke at.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub store: MemoryStore,
    pub meals: Arc<ScriptedMeals>,
}

/// Create a test app over a memory store and scripted meals.
#[allow(dead_code)]
pub fn create_test_app(meals: Vec<Meal>) -> TestApp {
    let store = MemoryStore::new();
    let meals = Arc::new(ScriptedMeals::with_meals(meals));
    let state = build_state(
        Config::test_default(),
        meals.clone(),
        Arc::new(store.clone()),
    );

    TestApp {
        router: create_router(state.clone()),
        state,
        store,
        meals,
    }
}

/// Create a test app whose store is an offline Firestore client.
#[allow(dead_code)]
pub fn create_offline_app() -> axum::Router {
    let state = build_state(
        Config::test_default(),
        Arc::new(ScriptedMeals::default()),
        Arc::new(FirestoreDb::new_mock()),
    );
    create_router(state)
}

/// Create a test app with a specific frontend URL (cookie attributes depend on it).
#[allow(dead_code)]
pub fn create_test_app_with_frontend_url(frontend_url: &str) -> axum::Router {
    let mut config = Config::test_default();
    config.frontend_url = frontend_url.to_string();
    let state = build_state(
        config,
        Arc::new(ScriptedMeals::default()),
        Arc::new(MemoryStore::new()),
    );
    create_router(state)
}

fn build_state(
    config: Config,
    meals: Arc<ScriptedMeals>,
    store: Arc<dyn RecipeStore>,
) -> Arc<AppState> {
    Arc::new(AppState::new(config, meals, store, Arc::new(FakeIdentity)))
}

/// Create a session token the way sign-in does.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    recipe_share::middleware::auth::create_jwt(uid, signing_key).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
