//! User domain models and parameters.
//!
//! Provides the account model shared by authentication, verification and profile
//! operations, plus the parameter type used to create accounts at registration.

use chrono::{DateTime, Utc};

use crate::model::user::UserProfileDto;

/// Registered account with credentials and activation state.
///
/// Email addresses are always stored trimmed and lower-cased, so equality checks
/// against a normalized address are case-insensitive by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Surrogate key, also the JWT subject.
    pub id: i32,
    /// Display name, unique ignoring case.
    pub username: String,
    /// Normalized email address.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// False until the email address has been verified.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to the profile DTO returned by `/api/users/me`.
    ///
    /// # Returns
    /// - `UserProfileDto` - Profile without credential data
    pub fn into_dto(self) -> UserProfileDto {
        UserProfileDto {
            id: self.id,
            username: self.username,
            email: self.email,
            active: self.is_active,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `User` - The converted user domain model
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for inserting a new account.
///
/// Values are expected to be normalized and the password already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Accounts awaiting email verification are created inactive.
    pub is_active: bool,
}
