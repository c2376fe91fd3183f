//! Password change token factory.

use crate::factory::helpers::unique_token_hash;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for inserting pending password changes.
///
/// The new password is hashed on insert, mirroring what the application stores.
pub struct PasswordChangeTokenFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    token_hash: String,
    new_password: String,
    expires_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl<'a> PasswordChangeTokenFactory<'a> {
    /// Defaults to an unconfirmed change to `"new-password-123"` expiring in one hour.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            token_hash: unique_token_hash(),
            new_password: "new-password-123".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
            confirmed_at: None,
        }
    }

    pub fn token_hash(mut self, token_hash: impl Into<String>) -> Self {
        self.token_hash = token_hash.into();
        self
    }

    pub fn new_password(mut self, new_password: impl Into<String>) -> Self {
        self.new_password = new_password.into();
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn confirmed_at(mut self, confirmed_at: Option<DateTime<Utc>>) -> Self {
        self.confirmed_at = confirmed_at;
        self
    }

    pub async fn build(self) -> Result<entity::password_change_token::Model, DbErr> {
        let now = Utc::now();
        entity::password_change_token::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            token_hash: ActiveValue::Set(self.token_hash),
            new_password_hash: ActiveValue::Set(password_auth::generate_hash(&self.new_password)),
            expires_at: ActiveValue::Set(self.expires_at),
            confirmed_at: ActiveValue::Set(self.confirmed_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_password_change_token(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::password_change_token::Model, DbErr> {
    PasswordChangeTokenFactory::new(db, user_id).build().await
}
