//! Authentication results passed from services to controllers.

use crate::model::api::StatusDto;

/// Token pair issued on login, refresh and email verification.
///
/// The access token goes into the response body while the raw refresh token is
/// delivered as an HttpOnly cookie.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Account is active and can log in immediately.
    Registered,
    /// Account is inactive until the emailed link is followed.
    VerificationRequired,
}

impl RegistrationOutcome {
    pub fn into_dto(self) -> StatusDto {
        match self {
            Self::Registered => StatusDto::registered(),
            Self::VerificationRequired => StatusDto::email_verification_required(),
        }
    }
}

/// Raw registration input; normalization and validation happen in the service.
#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterParam {
    pub fn from_dto(dto: crate::model::auth::RegisterDto) -> Self {
        Self {
            username: dto.username,
            email: dto.email,
            password: dto.password,
        }
    }
}
