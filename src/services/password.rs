// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Hashes are stored as `pbkdf2_sha256$<iterations>$<salt>$<hash>`. The
//! iteration count travels with the hash, so raising the configured count
//! only affects newly hashed passwords.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use std::num::NonZeroU32;

const ALGORITHM_ID: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = digest::SHA256_OUTPUT_LEN;

/// Password hashing errors.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Iteration count must be non-zero")]
    ZeroIterations,

    #[error("Failed to generate salt")]
    Rng,
}

/// Hashes and verifies passwords.
#[derive(Clone)]
pub struct PasswordHasher {
    iterations: NonZeroU32,
    rng: SystemRandom,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Result<Self, PasswordError> {
        let iterations = NonZeroU32::new(iterations).ok_or(PasswordError::ZeroIterations)?;
        Ok(Self {
            iterations,
            rng: SystemRandom::new(),
        })
    }

    /// Hash a password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt).map_err(|_| PasswordError::Rng)?;
        let salt = URL_SAFE_NO_PAD.encode(salt);

        let mut out = [0u8; HASH_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            self.iterations,
            salt.as_bytes(),
            password.as_bytes(),
            &mut out,
        );

        Ok(format!(
            "{}${}${}${}",
            ALGORITHM_ID,
            self.iterations,
            salt,
            STANDARD.encode(out)
        ))
    }

    /// Check a password against an encoded hash.
    ///
    /// Malformed hashes never verify.
    pub fn verify(&self, password: &str, encoded: &str) -> bool {
        let mut parts = encoded.split('$');
        let (Some(algorithm), Some(iterations), Some(salt), Some(hash), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return false;
        };

        if algorithm != ALGORITHM_ID {
            return false;
        }
        let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
            return false;
        };
        let Ok(expected) = STANDARD.decode(hash) else {
            return false;
        };

        pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            salt.as_bytes(),
            password.as_bytes(),
            &expected,
        )
        .is_ok()
    }

    /// Hash on the blocking pool; PBKDF2 at production cost takes long
    /// enough to stall the async workers.
    pub async fn hash_blocking(&self, password: String) -> anyhow::Result<String> {
        let hasher = self.clone();
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
        Ok(hashed)
    }

    /// Verify on the blocking pool.
    pub async fn verify_blocking(&self, password: String, encoded: String) -> anyhow::Result<bool> {
        let hasher = self.clone();
        let ok = tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded)).await?;
        Ok(ok)
    }
}
