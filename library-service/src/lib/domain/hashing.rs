//! Password hashing off the async executor.
//!
//! Argon2 is deliberately slow, so both directions run on the blocking pool.

use auth::PasswordError;
use auth::PasswordHasher;

pub async fn hash(hasher: &PasswordHasher, password: &str) -> Result<String, PasswordError> {
    let hasher = hasher.clone();
    let password = password.to_owned();

    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
}

pub async fn verify(
    hasher: &PasswordHasher,
    password: &str,
    stored_hash: &str,
) -> Result<bool, PasswordError> {
    let hasher = hasher.clone();
    let password = password.to_owned();
    let stored_hash = stored_hash.to_owned();

    tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
        .await
        .map_err(|e| PasswordError::VerificationFailed(e.to_string()))?
}
