//! Email verification token factory.

use crate::factory::helpers::unique_token_hash;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for inserting email verification tokens.
pub struct EmailVerificationTokenFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    token_hash: String,
    expires_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl<'a> EmailVerificationTokenFactory<'a> {
    /// Defaults to an unconfirmed token expiring in one day.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            token_hash: unique_token_hash(),
            expires_at: Utc::now() + Duration::days(1),
            confirmed_at: None,
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

    pub fn confirmed_at(mut self, confirmed_at: Option<DateTime<Utc>>) -> Self {
        self.confirmed_at = confirmed_at;
        self
    }

    pub async fn build(self) -> Result<entity::email_verification_token::Model, DbErr> {
        let now = Utc::now();
        entity::email_verification_token::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            token_hash: ActiveValue::Set(self.token_hash),
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

pub async fn create_verification_token(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::email_verification_token::Model, DbErr> {
    EmailVerificationTokenFactory::new(db, user_id).build().await
}
