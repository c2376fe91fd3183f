//! Email change token factory.

use crate::factory::helpers::{next_id, unique_token_hash};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for inserting pending email changes.
pub struct EmailChangeTokenFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    token_hash: String,
    new_email: String,
    expires_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl<'a> EmailChangeTokenFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - new_email: `"changed{id}@example.com"`
    /// - expires_at: 1 hour from now
    /// - confirmed_at: `None`
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            token_hash: unique_token_hash(),
            new_email: format!("changed{}@example.com", next_id()),
            expires_at: Utc::now() + Duration::hours(1),
            confirmed_at: None,
        }
    }

    pub fn token_hash(mut self, token_hash: impl Into<String>) -> Self {
        self.token_hash = token_hash.into();
        self
    }

    pub fn new_email(mut self, new_email: impl Into<String>) -> Self {
        self.new_email = new_email.into();
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

    pub async fn build(self) -> Result<entity::email_change_token::Model, DbErr> {
        let now = Utc::now();
        entity::email_change_token::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            token_hash: ActiveValue::Set(self.token_hash),
            new_email: ActiveValue::Set(self.new_email),
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

pub async fn create_email_change_token(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::email_change_token::Model, DbErr> {
    EmailChangeTokenFactory::new(db, user_id).build().await
}
