use axum::http::StatusCode;
use thiserror::Error;

use migration::USERNAME_LENGTH_CHECK;
use sea_orm::{DbErr, SqlErr};

use crate::server::{
    error::{AppError, Problem},
    service::auth::MIN_USERNAME_LENGTH,
};

#[derive(Error, Debug)]
pub enum AuthError {
    /// Email unknown or password does not match.
    ///
    /// Both cases share one error so the response does not reveal which accounts exist.
    /// Results in a 401 Unauthorized response.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Correct credentials for an account whose email is not verified yet.
    ///
    /// Results in a 409 Conflict response.
    #[error("Email not verified")]
    EmailNotVerified,

    /// Another account already uses this email address. Results in 409 Conflict.
    #[error("Email already in use")]
    EmailAlreadyInUse,

    /// Another account already uses this username (case-insensitive). Results in 409 Conflict.
    #[error("Username already in use")]
    UsernameAlreadyInUse,

    /// Registration raced with a unique constraint that could not be attributed to a column.
    #[error("Conflict")]
    Conflict,

    #[error("Username length must be at least {0}")]
    UsernameTooShort(usize),

    #[error("Username length must be at most {0}")]
    UsernameTooLong(usize),

    #[error("Email must be different from current")]
    EmailSameAsCurrent,

    #[error("Password must be different from current")]
    PasswordSameAsCurrent,

    /// Refresh attempted for a user that is not active. Results in 401 Unauthorized.
    #[error("User is inactive")]
    UserInactive,

    /// Bearer authentication failed.
    ///
    /// The reason is only logged; clients always receive the same generic detail.
    ///
    /// # Fields
    /// - Reason the request was rejected
    #[error("Authentication required: {0}")]
    Unauthorized(String),
}

impl AuthError {
    /// Maps authentication errors to problem descriptions:
    /// - `InvalidCredentials` → 401 `INVALID_CREDENTIALS`
    /// - `EmailNotVerified` → 409 `EMAIL_NOT_VERIFIED`
    /// - `EmailAlreadyInUse` / `UsernameAlreadyInUse` / `Conflict` → 409 with matching code
    /// - `UsernameTooShort` → 400 `USERNAME_TOO_SHORT`
    /// - `UsernameTooLong` → 400 `VALIDATION_ERROR`
    /// - `EmailSameAsCurrent` / `PasswordSameAsCurrent` → 400 with matching code
    /// - `UserInactive` / `Unauthorized` → 401 `UNAUTHORIZED`
    pub fn problem(&self) -> Problem {
        match self {
            Self::InvalidCredentials => Problem::new(
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                self.to_string(),
            ),
            Self::EmailNotVerified => {
                Problem::new(StatusCode::CONFLICT, "EMAIL_NOT_VERIFIED", self.to_string())
                    .with_title("Email not verified")
            }
            Self::EmailAlreadyInUse => {
                Problem::new(StatusCode::CONFLICT, "EMAIL_ALREADY_IN_USE", self.to_string())
            }
            Self::UsernameAlreadyInUse => Problem::new(
                StatusCode::CONFLICT,
                "USERNAME_ALREADY_IN_USE",
                self.to_string(),
            ),
            Self::Conflict => Problem::new(StatusCode::CONFLICT, "CONFLICT", self.to_string()),
            Self::UsernameTooShort(_) => Problem::new(
                StatusCode::BAD_REQUEST,
                "USERNAME_TOO_SHORT",
                self.to_string(),
            ),
            Self::UsernameTooLong(_) => {
                Problem::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", self.to_string())
            }
            Self::EmailSameAsCurrent => Problem::new(
                StatusCode::BAD_REQUEST,
                "EMAIL_SAME_AS_CURRENT",
                self.to_string(),
            ),
            Self::PasswordSameAsCurrent => Problem::new(
                StatusCode::BAD_REQUEST,
                "PASSWORD_SAME_AS_CURRENT",
                self.to_string(),
            ),
            Self::UserInactive => Problem::from_status(StatusCode::UNAUTHORIZED, self.to_string()),
            Self::Unauthorized(_) => {
                Problem::from_status(StatusCode::UNAUTHORIZED, "Authentication required")
            }
        }
    }
}

/// Maps a constraint violation on `users` to the matching domain error.
///
/// Unique violations are recognised by the column name in the driver message, which
/// holds for the SQLite (`users.email`, `ux_users_username_lower`) and Postgres
/// (`ux_users_email`) wording. The minimum username length check is recognised by
/// its constraint name.
///
/// # Returns
/// - `AppError::AuthErr` - For unique violations and the username length check
/// - `AppError::DbErr` - For any other database error
pub fn map_user_constraint_violation(err: DbErr) -> AppError {
    if err.to_string().contains(USERNAME_LENGTH_CHECK) {
        return AuthError::UsernameTooShort(MIN_USERNAME_LENGTH).into();
    }

    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            if message.contains("email") {
                AuthError::EmailAlreadyInUse.into()
            } else if message.contains("username") {
                AuthError::UsernameAlreadyInUse.into()
            } else {
                AuthError::Conflict.into()
            }
        }
        _ => err.into(),
    }
}
