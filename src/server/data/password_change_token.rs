//! Password change token data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

use crate::server::model::token::PasswordChangeToken;

/// Repository for pending password changes.
pub struct PasswordChangeTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PasswordChangeTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a pending password change.
    ///
    /// # Arguments
    /// - `user_id` - User changing their password
    /// - `token_hash` - Hex SHA-256 of the raw token
    /// - `new_password_hash` - Argon2 hash of the requested password
    /// - `expires_at` - Instant after which the token answers 410 Gone
    pub async fn create(
        &self,
        user_id: i32,
        token_hash: String,
        new_password_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordChangeToken, DbErr> {
        let now = Utc::now();
        let entity = entity::password_change_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token_hash: ActiveValue::Set(token_hash),
            new_password_hash: ActiveValue::Set(new_password_hash),
            expires_at: ActiveValue::Set(expires_at),
            confirmed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(PasswordChangeToken::from_entity(entity))
    }

    pub async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordChangeToken>, DbErr> {
        let entity = entity::prelude::PasswordChangeToken::find()
            .filter(entity::password_change_token::Column::TokenHash.eq(token_hash))
            .one(self.db)
            .await?;

        Ok(entity.map(PasswordChangeToken::from_entity))
    }

    pub async fn delete_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::PasswordChangeToken::delete_many()
            .filter(entity::password_change_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn confirm(&self, token_id: i32, confirmed_at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::PasswordChangeToken::update_many()
            .filter(entity::password_change_token::Column::Id.eq(token_id))
            .filter(entity::password_change_token::Column::ConfirmedAt.is_null())
            .col_expr(
                entity::password_change_token::Column::ConfirmedAt,
                Expr::value(Some(confirmed_at)),
            )
            .col_expr(
                entity::password_change_token::Column::UpdatedAt,
                Expr::value(confirmed_at),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
