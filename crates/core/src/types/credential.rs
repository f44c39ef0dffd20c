//! Password hashing.
//!
//! Stored under the historical `passwordHash` wire name, but always a
//! salted argon2 PHC string. Plaintext never touches the store.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Errors from hashing or verifying a password.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Hashing failed (should not happen with default parameters).
    #[error("failed to hash password")]
    Hash,
    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed")]
    MalformedHash,
}

/// Hash a password with a fresh random salt.
///
/// # Errors
///
/// Returns [`CredentialError::Hash`] if the hasher fails.
pub fn hash_password(password: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| CredentialError::Hash)
}

/// Verify a password against a stored PHC hash string.
///
/// # Errors
///
/// Returns [`CredentialError::MalformedHash`] if the stored hash cannot be
/// parsed. A wrong password is `Ok(false)`, not an error.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, CredentialError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| CredentialError::MalformedHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
