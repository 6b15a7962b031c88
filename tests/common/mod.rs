// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use recipe_api::config::Config;
use recipe_api::db::{Database, FirestoreDb};
use recipe_api::routes::create_router;
use recipe_api::services::accounts::NewUser;
use recipe_api::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

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

/// Create a test database connection against the emulator.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by in-memory storage.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Database::in_memory();
    let state = Arc::new(AppState::new(config, db).expect("Failed to build state"));

    (create_router(state.clone()), state)
}

/// Register a user directly through the account service.
#[allow(dead_code)]
pub async fn create_user(state: &AppState, email: &str, password: &str, name: &str) {
    state
        .accounts
        .register(NewUser {
            email: email.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        })
        .await
        .expect("Failed to create user");
}

/// Register a user and return a token for them.
#[allow(dead_code)]
pub async fn authenticated_user(state: &AppState, email: &str) -> String {
    create_user(state, email, "test1234", "Test name").await;
    state
        .accounts
        .obtain_token(email, "test1234")
        .await
        .expect("Failed to obtain token")
        .key
}

/// Build a JSON request, optionally authenticated.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Token {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a bodiless request, optionally authenticated.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Token {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Send a request and decode the JSON response body (`Null` if empty).
#[allow(dead_code)]
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
