// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod ingredient;
pub mod user;

pub use ingredient::Ingredient;
pub use user::{AuthToken, User, UserChanges};
