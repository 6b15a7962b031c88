// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set). They skip otherwise.

use recipe_api::models::{AuthToken, Ingredient, User, UserChanges};

mod common;
use common::test_db;

/// Generate a unique suffix for test isolation.
fn unique_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn test_user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        name: "Test".to_string(),
        password_hash: "pbkdf2_sha256$1000$salt$aGFzaA==".to_string(),
        is_active: true,
        created_at: "2026-01-01T00:00:00.000000Z".to_string(),
    }
}

fn test_ingredient(user_id: &str, name: &str, created_at: &str) -> Ingredient {
    Ingredient {
        id: unique_id(),
        user_id: user_id.to_string(),
        name: name.to_string(),
        created_at: created_at.to_string(),
    }
}

fn test_token(user_id: &str) -> AuthToken {
    AuthToken {
        key: unique_id().replace('-', ""),
        user_id: user_id.to_string(),
        created_at: "2026-01-01T00:00:00.000000Z".to_string(),
    }
}

#[tokio::test]
async fn test_user_email_uniqueness() {
    require_emulator!();

    let db = test_db().await;
    let email = format!("{}@example.com", unique_id());
    let first = test_user(&unique_id(), &email);
    let second = test_user(&unique_id(), &email);

    assert!(db.create_user(&first).await.unwrap());
    assert!(!db.create_user(&second).await.unwrap());

    // The losing registration rolls back its user document; the reservation
    // still points at the first user.
    let fetched = db.get_user_by_email(&email).await.unwrap().unwrap();
    assert_eq!(fetched.id, first.id);
    assert!(db.get_user(&second.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_user() {
    require_emulator!();

    let db = test_db().await;
    let user = test_user(&unique_id(), &format!("{}@example.com", unique_id()));
    assert!(db.create_user(&user).await.unwrap());

    let renamed = UserChanges {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };
    let rehashed = UserChanges {
        password_hash: Some("pbkdf2_sha256$1000$salt$bmV3".to_string()),
        ..Default::default()
    };
    // Separate partial writes must not overwrite each other's fields.
    let (a, b) = tokio::join!(
        db.update_user(&user.id, &renamed),
        db.update_user(&user.id, &rehashed)
    );
    a.unwrap();
    b.unwrap();

    let fetched = db.get_user(&user.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Renamed");
    assert_eq!(fetched.password_hash, "pbkdf2_sha256$1000$salt$bmV3");
    assert_eq!(fetched.email, user.email);

    assert!(db
        .update_user(&unique_id(), &renamed)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_tokens_by_key_and_user() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_id();
    let token = test_token(&user_id);
    let issued = db.issue_token(&token).await.unwrap();
    assert_eq!(issued.key, token.key);

    assert_eq!(db.get_token(&token.key).await.unwrap().unwrap().user_id, user_id);
    assert_eq!(
        db.get_token_for_user(&user_id).await.unwrap().unwrap().key,
        token.key
    );
    assert!(db.get_token_for_user(&unique_id()).await.unwrap().is_none());

    // A second candidate for the same user loses and is not stored.
    let late = test_token(&user_id);
    assert_eq!(db.issue_token(&late).await.unwrap().key, token.key);
    assert!(db.get_token(&late.key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_ingredients_scoped_and_ordered() {
    require_emulator!();

    let db = test_db().await;
    let owner = unique_id();
    let other = unique_id();

    for (user_id, name) in [(&owner, "Pepper"), (&owner, "Salt"), (&other, "Banana")] {
        db.insert_ingredient(&test_ingredient(
            user_id,
            name,
            "2026-01-01T00:00:00.000000Z",
        ))
        .await
        .unwrap();
    }

    let names: Vec<String> = db
        .list_ingredients(&owner)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Salt", "Pepper"]);
}
