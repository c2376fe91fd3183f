//! Argon2 password hashing on the blocking thread pool.

use crate::server::error::{internal::InternalError, AppError};

/// Hashes a password with a fresh salt.
///
/// # Returns
/// - `Ok(String)` - PHC formatted hash
/// - `Err(AppError::InternalErr(PasswordHash))` - Blocking task failed
pub async fn hash(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || password_auth::generate_hash(password))
        .await
        .map_err(|e| InternalError::PasswordHash(e.to_string()).into())
}

/// Checks a password against a stored hash.
///
/// # Returns
/// - `Ok(true)` - Password matches
/// - `Ok(false)` - Password does not match or the stored hash is unparsable
/// - `Err(AppError::InternalErr(PasswordHash))` - Blocking task failed
pub async fn verify(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || password_auth::verify_password(password, &hash).is_ok())
        .await
        .map_err(|e| InternalError::PasswordHash(e.to_string()).into())
}
