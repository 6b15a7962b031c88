// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recipe API: token-authenticated user accounts and per-user ingredients.
//!
//! Every request other than registration, token issuance and the health
//! check must carry a token; the resolved user scopes all data access.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::{AccountService, PasswordHasher};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub accounts: AccountService,
}

impl AppState {
    /// Wire services over an already-connected database.
    pub fn new(config: Config, db: Database) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::new(config.password_hash_iterations)?;
        let accounts = AccountService::new(db.clone(), hasher);
        Ok(Self {
            config,
            db,
            accounts,
        })
    }
}
