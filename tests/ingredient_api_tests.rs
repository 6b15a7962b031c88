// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ingredient API tests: ownership scoping, ordering and validation.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{authenticated_user, create_test_app, empty_request, json_request, send};

const INGREDIENTS_URL: &str = "/api/recipe/ingredients/";

#[tokio::test]
async fn test_login_required() {
    let (app, _) = create_test_app();

    let (status, _) = send(&app, empty_request("GET", INGREDIENTS_URL, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_retrieve_ingredients_list() {
    let (app, state) = create_test_app();
    let token = authenticated_user(&state, "test@gmail.com").await;

    for name in ["Salt", "Pepper", "Kale"] {
        let (status, _) = send(
            &app,
            json_request("POST", INGREDIENTS_URL, Some(&token), json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, empty_request("GET", INGREDIENTS_URL, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Salt", "Pepper", "Kale"]);
}

#[tokio::test]
async fn test_ingredients_limited_to_user() {
    let (app, state) = create_test_app();
    let token = authenticated_user(&state, "test@gmail.com").await;
    let other_token = authenticated_user(&state, "other@gmail.com").await;

    send(
        &app,
        json_request(
            "POST",
            INGREDIENTS_URL,
            Some(&other_token),
            json!({ "name": "Banana" }),
        ),
    )
    .await;
    send(
        &app,
        json_request("POST", INGREDIENTS_URL, Some(&token), json!({ "name": "Eggs" })),
    )
    .await;

    let (status, body) = send(&app, empty_request("GET", INGREDIENTS_URL, Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Eggs");

    let (_, body) = send(
        &app,
        empty_request("GET", INGREDIENTS_URL, Some(&other_token)),
    )
    .await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Banana");
}

#[tokio::test]
async fn test_create_ingredient_successful() {
    let (app, state) = create_test_app();
    let token = authenticated_user(&state, "test@gmail.com").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            INGREDIENTS_URL,
            Some(&token),
            json!({ "name": "Test Ingredient" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Test Ingredient");
    assert!(body["id"].is_string());

    let user = state
        .db
        .get_user_by_email("test@gmail.com")
        .await
        .unwrap()
        .unwrap();
    let stored = state.db.list_ingredients(&user.id).await.unwrap();
    assert!(stored
        .iter()
        .any(|i| i.name == "Test Ingredient" && i.user_id == user.id));
}

#[tokio::test]
async fn test_create_ingredient_invalid() {
    let (app, state) = create_test_app();
    let token = authenticated_user(&state, "test@gmail.com").await;

    for payload in [json!({ "name": "" }), json!({ "name": "   " }), json!({})] {
        let (status, body) = send(
            &app,
            json_request("POST", INGREDIENTS_URL, Some(&token), payload),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["fields"].get("name").is_some());
    }

    let (_, body) = send(&app, empty_request("GET", INGREDIENTS_URL, Some(&token))).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_ingredient_name_too_long() {
    let (app, state) = create_test_app();
    let token = authenticated_user(&state, "test@gmail.com").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            INGREDIENTS_URL,
            Some(&token),
            json!({ "name": "a".repeat(256) }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_ingredient_requires_token() {
    let (app, _) = create_test_app();

    let (status, _) = send(
        &app,
        json_request("POST", INGREDIENTS_URL, None, json!({ "name": "Salt" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
