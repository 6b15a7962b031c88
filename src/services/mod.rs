// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Business logic services.

pub mod accounts;
pub mod password;
pub mod tokens;

pub use accounts::AccountService;
pub use password::PasswordHasher;
