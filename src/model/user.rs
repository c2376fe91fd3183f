use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct UserProfileDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone)]
pub struct ChangeEmailDto {
    #[validate(
        email(message = "Invalid email format"),
        length(max = 254, message = "Email must not exceed 254 characters")
    )]
    pub new_email: String,
    pub current_password: String,
}

#[derive(Serialize, Deserialize, ToSchema, Validate, Debug, Clone)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
}
