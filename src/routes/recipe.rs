// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe routes. Every query is scoped to the authenticated caller.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::Ingredient;
use crate::routes::{method_not_allowed, ApiJson};
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Recipe routes (require authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/recipe/ingredients/",
        get(list_ingredients)
            .post(create_ingredient)
            .fallback(method_not_allowed),
    )
}

#[derive(Deserialize, Validate)]
pub struct CreateIngredientRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "This field may not be blank and has at most 255 characters."
    ))]
    pub name: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct IngredientResponse {
    pub id: String,
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

/// List the caller's ingredients, name descending.
async fn list_ingredients(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<IngredientResponse>>> {
    let ingredients = state.db.list_ingredients(&user.user_id).await?;

    tracing::debug!(
        user_id = %user.user_id,
        count = ingredients.len(),
        "Listed ingredients"
    );

    Ok(Json(ingredients.into_iter().map(Into::into).collect()))
}

/// Create an ingredient owned by the caller.
async fn create_ingredient(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(mut req): ApiJson<CreateIngredientRequest>,
) -> Result<(StatusCode, Json<IngredientResponse>)> {
    req.name = req.name.trim().to_string();
    req.validate()?;

    let ingredient = Ingredient {
        id: uuid::Uuid::new_v4().to_string(),
        user_id: user.user_id,
        name: req.name,
        created_at: crate::time_utils::now_rfc3339(),
    };
    state.db.insert_ingredient(&ingredient).await?;

    tracing::info!(
        user_id = %ingredient.user_id,
        ingredient_id = %ingredient.id,
        "Ingredient created"
    );

    Ok((StatusCode::CREATED, Json(ingredient.into())))
}
