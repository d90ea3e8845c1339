//! Password hashing and verification
//!
//! Argon2id with a per-password random salt; the salt travels inside the PHC
//! output string, so nothing but the digest needs to be stored.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;

use crate::error::{Result, SharelockError};

/// Hash a plaintext password with a fresh OS-random salt
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| SharelockError::SystemError(format!("password hashing failed: {}", e)))?
        .to_string();
    Ok(digest)
}

/// Verify a plaintext password against a stored digest
///
/// The underlying comparison does not short-circuit on early mismatch. A
/// digest that fails to parse verifies false rather than erroring.
pub fn verify_password(plain: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
