//! Refresh token data repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

use crate::server::model::token::RefreshToken;

/// Repository for stored refresh tokens, keyed by the SHA-256 of the raw value.
pub struct RefreshTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RefreshTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a new refresh token.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the token
    /// - `token_hash` - Hex SHA-256 of the raw token
    /// - `expires_at` - Instant after which the token is rejected
    ///
    /// # Returns
    /// - `Ok(RefreshToken)` - The stored token
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(
        &self,
        user_id: i32,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, DbErr> {
        let entity = entity::refresh_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            token_hash: ActiveValue::Set(token_hash),
            expires_at: ActiveValue::Set(expires_at),
            revoked_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(RefreshToken::from_entity(entity))
    }

    /// Finds a token by hash regardless of its state.
    ///
    /// # Returns
    /// - `Ok(Some(RefreshToken))` - Token found (may be revoked or expired)
    /// - `Ok(None)` - No token with that hash
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>, DbErr> {
        let entity = entity::prelude::RefreshToken::find()
            .filter(entity::refresh_token::Column::TokenHash.eq(token_hash))
            .one(self.db)
            .await?;

        Ok(entity.map(RefreshToken::from_entity))
    }

    /// Revokes a token unless it is already revoked, keeping the first revocation time.
    ///
    /// # Returns
    /// - `Ok(true)` - Token was live and is now revoked
    /// - `Ok(false)` - Token was already revoked or does not exist
    /// - `Err(DbErr)` - Database error during update
    pub async fn revoke(&self, token_id: i32, revoked_at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::RefreshToken::update_many()
            .filter(entity::refresh_token::Column::Id.eq(token_id))
            .filter(entity::refresh_token::Column::RevokedAt.is_null())
            .col_expr(
                entity::refresh_token::Column::RevokedAt,
                Expr::value(Some(revoked_at)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
