use chrono::{Duration, Utc};
use sea_orm::ConnectionTrait;

use crate::server::{
    data::refresh_token::RefreshTokenRepository,
    error::{
        token::{TokenError, TokenKind},
        AppError,
    },
    model::token::RefreshToken,
    util::token::{generate_raw_token, hash_token},
};

/// Issues, validates, rotates and revokes refresh tokens.
///
/// Only the SHA-256 of a token is stored; the raw value exists solely in the
/// client's cookie.
pub struct RefreshTokenService<'a, C: ConnectionTrait> {
    db: &'a C,
    ttl: Duration,
}

impl<'a, C: ConnectionTrait> RefreshTokenService<'a, C> {
    /// # Arguments
    /// - `db` - Connection or open transaction
    /// - `ttl` - Lifetime of newly issued tokens
    pub fn new(db: &'a C, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    /// Stores a new refresh token for a user.
    ///
    /// # Returns
    /// - `Ok(String)` - Raw token to hand to the client
    /// - `Err(AppError::DbErr)` - Database error during insert
    #[tracing::instrument(skip_all, fields(user_id = user_id), err(level = "warn"))]
    pub async fn issue(&self, user_id: i32) -> Result<String, AppError> {
        let raw = generate_raw_token();
        let expires_at = Utc::now() + self.ttl;

        RefreshTokenRepository::new(self.db)
            .create(user_id, hash_token(&raw), expires_at)
            .await?;

        Ok(raw)
    }

    /// Looks up a presented refresh token and checks it can still be used.
    ///
    /// # Arguments
    /// - `raw` - Cookie value, if the cookie was sent
    ///
    /// # Returns
    /// - `Ok(RefreshToken)` - Stored token that is neither revoked nor expired
    /// - `Err(TokenError::Required)` - No or blank token
    /// - `Err(TokenError::Invalid)` - No stored token with this hash
    /// - `Err(TokenError::Expired)` - Token was revoked or is past its expiry
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn get_valid(&self, raw: Option<&str>) -> Result<RefreshToken, AppError> {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Err(TokenError::Required(TokenKind::Refresh).into()),
        };

        let token = RefreshTokenRepository::new(self.db)
            .find_by_hash(&hash_token(raw))
            .await?
            .ok_or(TokenError::Invalid(TokenKind::Refresh))?;

        if !token.is_usable(Utc::now()) {
            return Err(TokenError::Expired(TokenKind::Refresh).into());
        }

        Ok(token)
    }

    /// Revokes a token and issues its replacement for the same user.
    ///
    /// Run inside a transaction so a failed insert does not leave the user without
    /// a usable token.
    ///
    /// # Returns
    /// - `Ok(String)` - Raw replacement token
    /// - `Err(AppError::DbErr)` - Database error
    #[tracing::instrument(skip_all, fields(user_id = token.user_id), err(level = "warn"))]
    pub async fn rotate(&self, token: &RefreshToken) -> Result<String, AppError> {
        RefreshTokenRepository::new(self.db)
            .revoke(token.id, Utc::now())
            .await?;

        self.issue(token.user_id).await
    }

    /// Revokes a presented token. Absent, blank or unknown tokens are ignored and
    /// an already revoked token keeps its original revocation time.
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn revoke(&self, raw: Option<&str>) -> Result<(), AppError> {
        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            return Ok(());
        };

        let repo = RefreshTokenRepository::new(self.db);
        if let Some(token) = repo.find_by_hash(&hash_token(raw)).await? {
            repo.revoke(token.id, Utc::now()).await?;
        }

        Ok(())
    }
}
