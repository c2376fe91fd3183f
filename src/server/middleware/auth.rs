use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::User,
    service::jwt::JwtService,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves the user behind the request's bearer access token.
///
/// Handlers construct the guard explicitly and call `require` before doing any work,
/// so unauthenticated requests never reach the service layer.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtService, headers: &'a HeaderMap) -> Self {
        Self { db, jwt, headers }
    }

    /// Requires a valid access token belonging to an active user.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated, active user
    /// - `Err(AuthError::Unauthorized)` - Missing or malformed header, bad signature,
    ///   expired token, unknown or inactive user
    pub async fn require(&self) -> Result<User, AppError> {
        let token = bearer_token(self.headers)
            .ok_or_else(|| AuthError::Unauthorized("missing bearer token".to_string()))?;

        let claims = self
            .jwt
            .verify(token)
            .map_err(|e| AuthError::Unauthorized(format!("invalid access token: {}", e)))?;

        let user_id = claims
            .user_id()
            .ok_or_else(|| AuthError::Unauthorized(format!("invalid subject {}", claims.sub)))?;

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Err(AuthError::Unauthorized(format!("user {} not found", user_id)).into());
        };

        if !user.is_active {
            return Err(AuthError::Unauthorized(format!("user {} is inactive", user_id)).into());
        }

        Ok(user)
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
