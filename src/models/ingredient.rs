// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ingredient model for storage.

use serde::{Deserialize, Serialize};

/// Ingredient stored in the `ingredients` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Opaque ingredient ID (also used as document ID)
    pub id: String,
    /// Owning user ID
    pub user_id: String,
    /// Ingredient name
    pub name: String,
    /// When the ingredient was created (ISO 8601)
    pub created_at: String,
}

/// Order ingredients by name descending, newest first among equal names.
pub fn sort_by_name_desc(ingredients: &mut [Ingredient]) {
    ingredients.sort_by(|a, b| {
        b.name
            .cmp(&a.name)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
