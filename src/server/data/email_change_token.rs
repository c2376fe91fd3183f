//! Email change token data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

use crate::server::model::token::EmailChangeToken;

/// Repository for pending email changes.
pub struct EmailChangeTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmailChangeTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a pending change of the user's address to `new_email`.
    ///
    /// # Returns
    /// - `Ok(EmailChangeToken)` - The stored token
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        user_id: i32,
        token_hash: String,
        new_email: String,
        expires_at: DateTime<Utc>,
    ) -> Result<EmailChangeToken, DbErr> {
        let now = Utc::now();
        let entity = entity::email_change_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token_hash: ActiveValue::Set(token_hash),
            new_email: ActiveValue::Set(new_email),
            expires_at: ActiveValue::Set(expires_at),
            confirmed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(EmailChangeToken::from_entity(entity))
    }

    pub async fn find_by_hash(&self, token_hash: &str) -> Result<Option<EmailChangeToken>, DbErr> {
        let entity = entity::prelude::EmailChangeToken::find()
            .filter(entity::email_change_token::Column::TokenHash.eq(token_hash))
            .one(self.db)
            .await?;

        Ok(entity.map(EmailChangeToken::from_entity))
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::EmailChangeToken::delete_many()
            .filter(entity::email_change_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks the token confirmed unless it already is; see
    /// `EmailVerificationTokenRepository::confirm`.
    pub async fn confirm(&self, token_id: i32, confirmed_at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::EmailChangeToken::update_many()
            .filter(entity::email_change_token::Column::Id.eq(token_id))
            .filter(entity::email_change_token::Column::ConfirmedAt.is_null())
            .col_expr(
                entity::email_change_token::Column::ConfirmedAt,
                Expr::value(Some(confirmed_at)),
            )
            .col_expr(
                entity::email_change_token::Column::UpdatedAt,
                Expr::value(confirmed_at),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
