//! Email verification token data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

use crate::server::model::token::EmailVerificationToken;

/// Repository for email verification tokens.
///
/// A user has at most one outstanding token in practice: issuing a new one deletes
/// the previous ones first.
pub struct EmailVerificationTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmailVerificationTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a new unconfirmed token.
    ///
    /// # Arguments
    /// - `user_id` - User whose email the token verifies
    /// - `token_hash` - Hex SHA-256 of the raw token
    /// - `expires_at` - Instant after which the token answers 410 Gone
    ///
    /// # Returns
    /// - `Ok(EmailVerificationToken)` - The stored token
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        user_id: i32,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<EmailVerificationToken, DbErr> {
        let now = Utc::now();
        let entity = entity::email_verification_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token_hash: ActiveValue::Set(token_hash),
            expires_at: ActiveValue::Set(expires_at),
            confirmed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(EmailVerificationToken::from_entity(entity))
    }

    /// Finds a token by hash regardless of its state.
    pub async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<EmailVerificationToken>, DbErr> {
        let entity = entity::prelude::EmailVerificationToken::find()
            .filter(entity::email_verification_token::Column::TokenHash.eq(token_hash))
            .one(self.db)
            .await?;

        Ok(entity.map(EmailVerificationToken::from_entity))
    }

    /// Deletes every token of the user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted tokens
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::EmailVerificationToken::delete_many()
            .filter(entity::email_verification_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks the token confirmed unless it already is.
    ///
    /// # Returns
    /// - `Ok(true)` - Token confirmed by this call
    /// - `Ok(false)` - Token was already confirmed (first timestamp kept) or missing
    /// - `Err(DbErr)` - Database error during update
    pub async fn confirm(&self, token_id: i32, confirmed_at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::EmailVerificationToken::update_many()
            .filter(entity::email_verification_token::Column::Id.eq(token_id))
            .filter(entity::email_verification_token::Column::ConfirmedAt.is_null())
            .col_expr(
                entity::email_verification_token::Column::ConfirmedAt,
                Expr::value(Some(confirmed_at)),
            )
            .col_expr(
                entity::email_verification_token::Column::UpdatedAt,
                Expr::value(confirmed_at),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
