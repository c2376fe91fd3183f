//! Refresh token factory.

use crate::factory::helpers::unique_token_hash;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for inserting refresh token rows directly.
///
/// Tests that need to present the raw token to the application should hash it
/// with the application's token hasher and pass the digest to `token_hash()`.
pub struct RefreshTokenFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    token_hash: String,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

impl<'a> RefreshTokenFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - token_hash: unique placeholder digest
    /// - expires_at: 30 days from now
    /// - revoked_at: `None`
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            token_hash: unique_token_hash(),
            expires_at: Utc::now() + Duration::days(30),
            revoked_at: None,
        }
    }

    pub fn token_hash(mut self, token_hash: impl Into<String>) -> Self {
        self.token_hash = token_hash.into();
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn revoked_at(mut self, revoked_at: Option<DateTime<Utc>>) -> Self {
        self.revoked_at = revoked_at;
        self
    }

    pub async fn build(self) -> Result<entity::refresh_token::Model, DbErr> {
        entity::refresh_token::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            token_hash: ActiveValue::Set(self.token_hash),
            expires_at: ActiveValue::Set(self.expires_at),
            revoked_at: ActiveValue::Set(self.revoked_at),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a live refresh token for the user.
pub async fn create_refresh_token(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::refresh_token::Model, DbErr> {
    RefreshTokenFactory::new(db, user_id).build().await
}
