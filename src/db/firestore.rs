// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile and password hash)
//! - User emails (uniqueness reservations)
//! - Tokens (opaque API tokens, plus a per-user slot keyed by user ID)
//! - Ingredients (owned by a single user)

use crate::db::collections;
use crate::error::AppError;
use crate::models::user::EmailReservation;
use crate::models::{AuthToken, Ingredient, User, UserChanges};
use firestore::errors::FirestoreError;

/// Document ID for an email reservation.
///
/// Hex keeps IDs free of `/` and other characters Firestore reserves.
fn email_doc_id(email: &str) -> String {
    hex::encode(email.as_bytes())
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user by normalized email via its reservation record.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let reservation: Option<EmailReservation> = self
            .client
            .fluent()
            .select()
            .by_id_in(collections::USER_EMAILS)
            .obj()
            .one(email_doc_id(email))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        match reservation {
            Some(r) => self.get_user(&r.user_id).await,
            None => Ok(None),
        }
    }

    /// Create a user, then reserve the email.
    ///
    /// The user document is written first under a fresh ID, so it is
    /// unreachable by email until the create-only reservation succeeds.
    /// A reservation therefore always points at an existing user; a failed
    /// cleanup can only leave an orphaned user document behind.
    pub async fn create_user(&self, user: &User) -> Result<bool, AppError> {
        let _: User = self
            .client
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let reservation = EmailReservation {
            user_id: user.id.clone(),
        };

        let reserved: Result<EmailReservation, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::USER_EMAILS)
            .document_id(email_doc_id(&user.email))
            .object(&reservation)
            .execute()
            .await;

        let result = match reserved {
            Ok(_) => return Ok(true),
            Err(FirestoreError::DataConflictError(_)) => {
                tracing::debug!("Email already reserved");
                Ok(false)
            }
            Err(e) => Err(AppError::Database(e.to_string())),
        };

        self.delete_doc(collections::USERS, &user.id).await;
        result
    }

    /// Apply a partial update to a user.
    ///
    /// Only the changed fields are written, so concurrent updates to
    /// different fields do not overwrite each other.
    pub async fn update_user(
        &self,
        user_id: &str,
        changes: &UserChanges,
    ) -> Result<Option<User>, AppError> {
        let Some(mut user) = self.get_user(user_id).await? else {
            return Ok(None);
        };
        changes.apply(&mut user);

        let fields = changes.field_names();
        if fields.is_empty() {
            return Ok(Some(user));
        }

        let _: User = self
            .client
            .fluent()
            .update()
            .fields(fields)
            .in_col(collections::USERS)
            .document_id(user_id)
            .object(&user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Re-read so fields written by other requests are reflected.
        self.get_user(user_id).await
    }

    // ─── Token Operations ────────────────────────────────────────

    /// Get a token by key.
    pub async fn get_token(&self, key: &str) -> Result<Option<AuthToken>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::TOKENS)
            .obj()
            .one(key)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the token issued to a user, if any.
    pub async fn get_token_for_user(&self, user_id: &str) -> Result<Option<AuthToken>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USER_TOKENS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Issue `candidate` unless the user already holds a token.
    ///
    /// The per-user slot is a create-only write; the loser of a race drops
    /// its candidate and returns the winner's token.
    pub async fn issue_token(&self, candidate: &AuthToken) -> Result<AuthToken, AppError> {
        // Key document first: a filled slot must always resolve.
        let _: AuthToken = self
            .client
            .fluent()
            .insert()
            .into(collections::TOKENS)
            .document_id(&candidate.key)
            .object(candidate)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let claimed: Result<AuthToken, FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::USER_TOKENS)
            .document_id(&candidate.user_id)
            .object(candidate)
            .execute()
            .await;

        match claimed {
            Ok(token) => Ok(token),
            Err(FirestoreError::DataConflictError(_)) => {
                tracing::debug!(user_id = %candidate.user_id, "Token already issued");
                self.delete_doc(collections::TOKENS, &candidate.key).await;
                self.get_token_for_user(&candidate.user_id)
                    .await?
                    .ok_or_else(|| AppError::Database("Token slot vanished".to_string()))
            }
            Err(e) => {
                self.delete_doc(collections::TOKENS, &candidate.key).await;
                Err(AppError::Database(e.to_string()))
            }
        }
    }

    /// Best-effort delete used to roll back a losing write.
    async fn delete_doc(&self, collection: &str, document_id: &str) {
        if let Err(e) = self
            .client
            .fluent()
            .delete()
            .from(collection)
            .document_id(document_id)
            .execute()
            .await
        {
            tracing::warn!(
                collection,
                document_id,
                error = %e,
                "Failed to roll back document"
            );
        }
    }

    // ─── Ingredient Operations ───────────────────────────────────

    /// List a user's ingredients, name descending.
    pub async fn list_ingredients(&self, user_id: &str) -> Result<Vec<Ingredient>, AppError> {
        let user_id = user_id.to_string();
        self.client
            .fluent()
            .select()
            .from(collections::INGREDIENTS)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .order_by([
                ("name", firestore::FirestoreQueryDirection::Descending),
                ("created_at", firestore::FirestoreQueryDirection::Descending),
            ])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Store an ingredient.
    pub async fn insert_ingredient(&self, ingredient: &Ingredient) -> Result<(), AppError> {
        let _: Ingredient = self
            .client
            .fluent()
            .insert()
            .into(collections::INGREDIENTS)
            .document_id(&ingredient.id)
            .object(ingredient)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
