use axum::http::StatusCode;
use std::fmt;
use thiserror::Error;

use crate::server::error::Problem;

/// The four kinds of hashed tokens the application issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Refresh,
    Verification,
    EmailChange,
    PasswordChange,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Refresh => "Refresh token",
            Self::Verification => "Verification token",
            Self::EmailChange => "Email change token",
            Self::PasswordChange => "Password change token",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Token was absent or blank.
    #[error("{0} is required")]
    Required(TokenKind),

    /// No stored token matches the hash of the presented value.
    #[error("{0} is invalid")]
    Invalid(TokenKind),

    /// Token exists but is past its expiry, or a refresh token was revoked.
    #[error("{0} is expired")]
    Expired(TokenKind),
}

impl TokenError {
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Required(kind) | Self::Invalid(kind) | Self::Expired(kind) => *kind,
        }
    }

    /// Refresh token errors are always 401; emailed tokens answer 400 for missing or
    /// unknown values and 410 Gone once expired. The code is the status name.
    pub fn problem(&self) -> Problem {
        let status = match (self.kind(), self) {
            (TokenKind::Refresh, _) => StatusCode::UNAUTHORIZED,
            (_, Self::Expired(_)) => StatusCode::GONE,
            _ => StatusCode::BAD_REQUEST,
        };

        Problem::from_status(status, self.to_string())
    }
}
