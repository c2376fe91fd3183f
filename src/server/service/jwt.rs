//! HS256 access token signing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::{
    config::JwtConfig,
    error::{internal::InternalError, AppError},
};

/// Access token claims. `sub` holds the user ID as a decimal string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Parses the subject back into a user ID.
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// Signs and verifies access tokens with the shared secret.
///
/// Keys are derived once at startup; the service is cloned into the application state.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
}

impl JwtService {
    /// Creates the service from JWT configuration.
    ///
    /// # Arguments
    /// - `config` - Secret and access token lifetime
    ///
    /// # Returns
    /// - `JwtService` - Service ready to sign and verify tokens
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_token_ttl: config.access_token_ttl,
        }
    }

    /// Issues an access token for a user.
    ///
    /// # Arguments
    /// - `user_id` - Subject of the token
    ///
    /// # Returns
    /// - `Ok(String)` - Compact encoded JWT
    /// - `Err(AppError::InternalErr(JwtEncode))` - Signing failed
    pub fn generate(&self, user_id: i32) -> Result<String, AppError> {
        let iat = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: iat.timestamp(),
            exp: (iat + self.access_token_ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| InternalError::JwtEncode(e).into())
    }

    /// Verifies signature and expiry of an access token.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is authentic and not expired
    /// - `Err(jsonwebtoken::errors::Error)` - Malformed, forged or expired token
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}
