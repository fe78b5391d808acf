// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Favorite join record linking a user to a recipe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document in the `favorites` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Document ID (filled on read, never written as a field)
    #[serde(alias = "_firestore_id", default, skip_serializing)]
    pub id: Option<String>,
    pub uid: String,
    /// Either a public API id or a stored recipe document id
    pub recipe_id: String,
    #[serde(with = "firestore::serialize_as_timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(uid: &str, recipe_id: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            uid: uid.to_string(),
            recipe_id: recipe_id.to_string(),
            created_at,
        }
    }
}

/// Document ID for a favorite: one per (uid, recipe) pair.
///
/// Both parts are url-encoded, which always escapes the `:` separator, so
/// distinct pairs never share an id and a `/` can never split the path.
pub fn favorite_doc_id(uid: &str, recipe_id: &str) -> String {
    format!(
        "{}:{}",
        urlencoding::encode(uid),
        urlencoding::encode(recipe_id)
    )
}
