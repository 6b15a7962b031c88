//! User and token models for storage.

use serde::{Deserialize, Serialize};

/// User account stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID (also used as document ID)
    pub id: String,
    /// Normalized email address, unique across users
    pub email: String,
    /// Display name
    pub name: String,
    /// `pbkdf2_sha256$...` encoded password hash
    pub password_hash: String,
    /// Inactive users cannot obtain or use tokens
    pub is_active: bool,
    /// When the account was created (ISO 8601)
    pub created_at: String,
}

/// Partial update to a user; `None` fields are left as stored.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    /// Apply the changes to an in-memory copy.
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(active) = self.is_active {
            user.is_active = active;
        }
    }

    /// Stored field names touched by these changes.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.password_hash.is_some() {
            fields.push("password_hash");
        }
        if self.is_active.is_some() {
            fields.push("is_active");
        }
        fields
    }
}

/// Email reservation in the `user_emails` collection.
///
/// Keyed by normalized email so that creating it doubles as the
/// uniqueness check for registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReservation {
    pub user_id: String,
}

/// Authentication token stored in the `tokens` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// 40 hex chars (also used as document ID)
    pub key: String,
    /// Owning user
    pub user_id: String,
    /// When the token was issued (ISO 8601)
    pub created_at: String,
}

/// Normalize an email address: trim, and lower-case the domain part.
///
/// The local part is case-sensitive per RFC 5321 and is kept as supplied.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
