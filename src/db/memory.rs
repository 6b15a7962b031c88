// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process storage backed by concurrent maps.

use crate::models::ingredient::sort_by_name_desc;
use crate::models::{AuthToken, Ingredient, User, UserChanges};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Default)]
struct Tables {
    users: DashMap<String, User>,
    /// normalized email -> user ID
    user_emails: DashMap<String, String>,
    tokens: DashMap<String, AuthToken>,
    /// user ID -> token key; at most one token per user
    user_tokens: DashMap<String, String>,
    ingredients: DashMap<String, Ingredient>,
}

/// In-memory database. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.tables.users.get(user_id).map(|u| u.clone())
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        let user_id = self.tables.user_emails.get(email)?.clone();
        self.get_user(&user_id)
    }

    pub fn create_user(&self, user: &User) -> bool {
        // Holding the entry guard makes reserve-then-insert atomic per email.
        match self.tables.user_emails.entry(user.email.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                self.tables.users.insert(user.id.clone(), user.clone());
                slot.insert(user.id.clone());
                true
            }
        }
    }

    pub fn update_user(&self, user_id: &str, changes: &UserChanges) -> Option<User> {
        // The shard write lock covers read-modify-write of this user.
        let mut user = self.tables.users.get_mut(user_id)?;
        changes.apply(&mut user);
        Some(user.clone())
    }

    pub fn get_token(&self, key: &str) -> Option<AuthToken> {
        self.tables.tokens.get(key).map(|t| t.clone())
    }

    pub fn get_token_for_user(&self, user_id: &str) -> Option<AuthToken> {
        let key = self.tables.user_tokens.get(user_id)?.clone();
        self.get_token(&key)
    }

    pub fn issue_token(&self, candidate: &AuthToken) -> AuthToken {
        match self.tables.user_tokens.entry(candidate.user_id.clone()) {
            Entry::Occupied(existing) => self
                .tables
                .tokens
                .get(existing.get())
                .map(|t| t.clone())
                .unwrap_or_else(|| candidate.clone()),
            Entry::Vacant(slot) => {
                self.tables
                    .tokens
                    .insert(candidate.key.clone(), candidate.clone());
                slot.insert(candidate.key.clone());
                candidate.clone()
            }
        }
    }

    pub fn list_ingredients(&self, user_id: &str) -> Vec<Ingredient> {
        let mut ingredients: Vec<Ingredient> = self
            .tables
            .ingredients
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| i.value().clone())
            .collect();
        sort_by_name_desc(&mut ingredients);
        ingredients
    }

    pub fn insert_ingredient(&self, ingredient: &Ingredient) {
        self.tables
            .ingredients
            .insert(ingredient.id.clone(), ingredient.clone());
    }
}
