// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opaque API token keys.

use ring::rand::{SecureRandom, SystemRandom};

/// Raw key length in bytes (40 hex chars once encoded).
const KEY_BYTES: usize = 20;

/// Generate a new random token key.
pub fn generate_key(rng: &SystemRandom) -> anyhow::Result<String> {
    let mut bytes = [0u8; KEY_BYTES];
    rng.fill(&mut bytes)
        .map_err(|_| anyhow::anyhow!("Failed to generate token key"))?;
    Ok(hex::encode(bytes))
}
