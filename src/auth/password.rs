// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Secret hashing.
//!
//! Argon2id with a random 16-byte salt, producing PHC-format strings. The
//! hash is computationally asymmetric: verifying a candidate costs the same
//! deliberate work as hashing, while recovering the secret from the hash is
//! infeasible. Registration and login therefore run noticeably slower than
//! steady-state authenticated calls.

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("salt generation failed: {0}")]
    Salt(String),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hash a plaintext secret into a PHC-format string.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Salt(e.to_string()))?;

    let argon2 = Argon2::default();
    let phc = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Verify a candidate secret against a stored PHC string.
///
/// An unparsable stored hash verifies as `false` rather than erroring; the
/// caller treats it like any other credential mismatch.
pub fn verify_password(hash: &str, password: &str) -> bool {
    if let Ok(parsed) = PasswordHash::new(hash) {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    } else {
        false
    }
}

/// Hash used to burn comparable verification work when a login email has no
/// matching identity, so response timing does not reveal account existence.
pub fn fallback_hash() -> Result<String, PasswordError> {
    hash_password("fallback-credential-padding")
}
