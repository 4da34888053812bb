use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::warn;

use crate::shared::AppError;

/// Hashes a password with Argon2id and a fresh random salt.
///
/// The plaintext is never stored; any hashing failure aborts the calling
/// operation.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            warn!(error = %e, "Failed to hash password");
            AppError::Internal
        })
}

/// Verifies a password candidate against a stored Argon2 hash.
///
/// A malformed stored hash verifies as false rather than erroring, so login
/// never discloses which check failed.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        warn!("Stored password hash could not be parsed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
