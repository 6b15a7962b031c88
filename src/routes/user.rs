// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes: registration, token issuance and the caller's profile.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::User;
use crate::routes::{method_not_allowed, ApiJson};
use crate::services::accounts::{NewUser, ProfileUpdate};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Routes reachable without a token.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/user/create/",
            post(create_user).fallback(method_not_allowed),
        )
        .route(
            "/api/user/token/",
            post(create_token).fallback(method_not_allowed),
        )
}

/// Routes for the authenticated caller.
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn private_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/user/me/",
        get(get_me).patch(update_me).fallback(method_not_allowed),
    )
}

// ─── Request / Response Types ────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(length(
        min = 6,
        message = "Ensure this field has at least 6 characters."
    ))]
    pub password: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 255,
        message = "This field may not be blank and has at most 255 characters."
    ))]
    pub name: String,
}

#[derive(Deserialize, Validate)]
pub struct TokenRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// Partial profile update. Unknown fields (including `email`) are ignored.
#[derive(Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "This field may not be blank and has at most 255 characters."
    ))]
    pub name: Option<String>,
    #[validate(length(
        min = 6,
        message = "Ensure this field has at least 6 characters."
    ))]
    pub password: Option<String>,
}

/// Public view of a user. Never includes the password or its hash.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            name: user.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TokenResponse {
    pub token: String,
}

// ─── Handlers ────────────────────────────────────────────────

/// Register a new user.
async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(mut req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    req.email = req.email.trim().to_string();
    req.name = req.name.trim().to_string();
    req.validate()?;

    let user = state
        .accounts
        .register(NewUser {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Exchange email and password for an API token.
async fn create_token(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    req.validate()?;

    let token = state.accounts.obtain_token(&req.email, &req.password).await?;

    Ok(Json(TokenResponse { token: token.key }))
}

/// Get the caller's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state.accounts.get_user(&user.user_id).await?;
    Ok(Json(profile.into()))
}

/// Update the caller's name and/or password.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(mut req): ApiJson<UpdateMeRequest>,
) -> Result<Json<UserResponse>> {
    req.name = req.name.map(|n| n.trim().to_string());
    req.validate()?;

    let updated = state
        .accounts
        .update_profile(
            &user.user_id,
            ProfileUpdate {
                name: req.name,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(updated.into()))
}
