use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone)]
pub struct RegisterDto {
    #[validate(length(max = 24, message = "Username must not exceed 24 characters"))]
    pub username: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 254, message = "Email must not exceed 254 characters")
    )]
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone)]
pub struct LoginDto {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Access token handed to the client; the refresh token travels in an HttpOnly cookie.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct AuthDto {
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
}

impl AuthDto {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
        }
    }
}

/// Body carrying a raw token taken from an emailed link.
#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone)]
pub struct TokenDto {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone)]
pub struct ResendVerificationDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}
