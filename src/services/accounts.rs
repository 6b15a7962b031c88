// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User accounts: registration, token issuance and profile updates.
//!
//! Callers validate request shape; this service applies the rules that
//! need storage (unique emails, credential checks, token ownership).

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::user::normalize_email;
use crate::models::{AuthToken, User, UserChanges};
use crate::services::password::PasswordHasher;
use crate::services::tokens::generate_key;
use ring::rand::SystemRandom;

/// Fields for a new account.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Partial profile update; `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Account operations shared by the user routes and the auth middleware.
#[derive(Clone)]
pub struct AccountService {
    db: Database,
    hasher: PasswordHasher,
    rng: SystemRandom,
}

impl AccountService {
    pub fn new(db: Database, hasher: PasswordHasher) -> Self {
        Self {
            db,
            hasher,
            rng: SystemRandom::new(),
        }
    }

    /// Register a new user.
    ///
    /// Nothing is persisted when the email is already taken.
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        let email = normalize_email(&new_user.email);

        // Cheap pre-check so duplicates skip the hashing cost; create_user
        // remains the authoritative uniqueness check.
        if self.db.get_user_by_email(&email).await?.is_some() {
            return Err(duplicate_email());
        }

        let password_hash = self.hasher.hash_blocking(new_user.password).await?;

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name: new_user.name.trim().to_string(),
            password_hash,
            is_active: true,
            created_at: crate::time_utils::now_rfc3339(),
        };

        if !self.db.create_user(&user).await? {
            return Err(duplicate_email());
        }

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Check credentials and return the user's token, issuing one on first use.
    pub async fn obtain_token(&self, email: &str, password: &str) -> Result<AuthToken> {
        let email = normalize_email(email);

        let Some(user) = self.db.get_user_by_email(&email).await? else {
            tracing::debug!("Token request for unknown email");
            return Err(AppError::InvalidCredentials);
        };

        let matches = self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await?;
        if !matches || !user.is_active {
            tracing::info!(user_id = %user.id, "Token request with invalid credentials");
            return Err(AppError::InvalidCredentials);
        }

        if let Some(token) = self.db.get_token_for_user(&user.id).await? {
            return Ok(token);
        }

        let candidate = AuthToken {
            key: generate_key(&self.rng)?,
            user_id: user.id.clone(),
            created_at: crate::time_utils::now_rfc3339(),
        };
        let token = self.db.issue_token(&candidate).await?;

        if token.key == candidate.key {
            tracing::info!(user_id = %user.id, "Token issued");
        }
        Ok(token)
    }

    /// Resolve a token key to its active owner.
    pub async fn resolve_token(&self, key: &str) -> Result<User> {
        let token = self
            .db
            .get_token(key)
            .await?
            .ok_or(AppError::InvalidToken)?;

        match self.db.get_user(&token.user_id).await? {
            Some(user) if user.is_active => Ok(user),
            Some(_) => {
                tracing::warn!(user_id = %token.user_id, "Token presented for inactive user");
                Err(AppError::InvalidToken)
            }
            None => {
                tracing::warn!(user_id = %token.user_id, "Token references missing user");
                Err(AppError::InvalidToken)
            }
        }
    }

    /// Fetch a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        self.db
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    /// Apply a partial update to the user's own profile.
    ///
    /// Existing tokens remain valid after a password change.
    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<User> {
        let password_changed = update.password.is_some();
        let password_hash = match update.password {
            Some(password) => Some(self.hasher.hash_blocking(password).await?),
            None => None,
        };
        let changes = UserChanges {
            name: update.name.map(|n| n.trim().to_string()),
            password_hash,
            is_active: None,
        };

        let user = self
            .db
            .update_user(user_id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        tracing::info!(user_id = %user.id, password_changed, "Profile updated");
        Ok(user)
    }
}

fn duplicate_email() -> AppError {
    AppError::field("email", "user with this email already exists.")
}
