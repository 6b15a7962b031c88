// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! [`Database`] dispatches to Firestore in deployments and to in-process
//! maps for local development and tests. Both backends honour the same
//! contract: emails are unique, each user holds at most one token, and
//! ingredient listings only ever contain rows owned by the requested user.

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::models::{AuthToken, Ingredient, User, UserChanges};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Email reservations (keyed by normalized email)
    pub const USER_EMAILS: &str = "user_emails";
    pub const TOKENS: &str = "tokens";
    /// The single token issued to each user (keyed by user ID)
    pub const USER_TOKENS: &str = "user_tokens";
    pub const INGREDIENTS: &str = "ingredients";
}

/// Storage handle shared by all handlers.
#[derive(Clone)]
pub enum Database {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Database {
    /// Connect to the backend selected in config.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.storage_backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data is lost on restart");
                Ok(Database::Memory(MemoryDb::new()))
            }
            StorageBackend::Firestore => {
                let project_id = config.gcp_project_id.as_deref().ok_or_else(|| {
                    AppError::Database("GCP_PROJECT_ID is required for Firestore".to_string())
                })?;
                Ok(Database::Firestore(FirestoreDb::new(project_id).await?))
            }
        }
    }

    /// Fresh in-memory database.
    pub fn in_memory() -> Self {
        Database::Memory(MemoryDb::new())
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        match self {
            Database::Firestore(db) => db.get_user(user_id).await,
            Database::Memory(db) => Ok(db.get_user(user_id)),
        }
    }

    /// Look up a user by normalized email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match self {
            Database::Firestore(db) => db.get_user_by_email(email).await,
            Database::Memory(db) => Ok(db.get_user_by_email(email)),
        }
    }

    /// Create a user.
    ///
    /// Returns `false` (and writes nothing) if the email is already taken.
    pub async fn create_user(&self, user: &User) -> Result<bool, AppError> {
        match self {
            Database::Firestore(db) => db.create_user(user).await,
            Database::Memory(db) => Ok(db.create_user(user)),
        }
    }

    /// Write only the supplied fields of a user.
    ///
    /// Returns the updated user, or `None` if it does not exist.
    pub async fn update_user(
        &self,
        user_id: &str,
        changes: &UserChanges,
    ) -> Result<Option<User>, AppError> {
        match self {
            Database::Firestore(db) => db.update_user(user_id, changes).await,
            Database::Memory(db) => Ok(db.update_user(user_id, changes)),
        }
    }

    // ─── Tokens ──────────────────────────────────────────────────

    pub async fn get_token(&self, key: &str) -> Result<Option<AuthToken>, AppError> {
        match self {
            Database::Firestore(db) => db.get_token(key).await,
            Database::Memory(db) => Ok(db.get_token(key)),
        }
    }

    pub async fn get_token_for_user(&self, user_id: &str) -> Result<Option<AuthToken>, AppError> {
        match self {
            Database::Firestore(db) => db.get_token_for_user(user_id).await,
            Database::Memory(db) => Ok(db.get_token_for_user(user_id)),
        }
    }

    /// Store `candidate` as the user's token unless one already exists.
    ///
    /// Returns the token the user ends up holding; concurrent callers for
    /// one user all receive the same token.
    pub async fn issue_token(&self, candidate: &AuthToken) -> Result<AuthToken, AppError> {
        match self {
            Database::Firestore(db) => db.issue_token(candidate).await,
            Database::Memory(db) => Ok(db.issue_token(candidate)),
        }
    }

    // ─── Ingredients ─────────────────────────────────────────────

    /// Ingredients owned by `user_id`, ordered by name descending.
    pub async fn list_ingredients(&self, user_id: &str) -> Result<Vec<Ingredient>, AppError> {
        match self {
            Database::Firestore(db) => db.list_ingredients(user_id).await,
            Database::Memory(db) => Ok(db.list_ingredients(user_id)),
        }
    }

    pub async fn insert_ingredient(&self, ingredient: &Ingredient) -> Result<(), AppError> {
        match self {
            Database::Firestore(db) => db.insert_ingredient(ingredient).await,
            Database::Memory(db) => {
                db.insert_ingredient(ingredient);
                Ok(())
            }
        }
    }
}
