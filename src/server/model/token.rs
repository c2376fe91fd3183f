//! Stored token domain models.
//!
//! Refresh tokens are revocable bearer credentials; the other three kinds are
//! one-time confirmation tokens that become confirmed once and then stay that way.

use chrono::{DateTime, Utc};

/// Shared expiry and confirmation behaviour of emailed one-time tokens.
pub trait OneTimeToken {
    fn expires_at(&self) -> DateTime<Utc>;
    fn confirmed_at(&self) -> Option<DateTime<Utc>>;

    /// A token is expired strictly after its expiry instant.
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() < now
    }

    fn is_confirmed(&self) -> bool {
        self.confirmed_at().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshToken {
    pub id: i32,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Usable when neither revoked nor expired.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }

    pub fn from_entity(entity: entity::refresh_token::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            expires_at: entity.expires_at,
            revoked_at: entity.revoked_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailVerificationToken {
    pub id: i32,
    pub user_id: i32,
    pub expires_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl EmailVerificationToken {
    pub fn from_entity(entity: entity::email_verification_token::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            expires_at: entity.expires_at,
            confirmed_at: entity.confirmed_at,
        }
    }
}

/// Pending change of a user's email address to `new_email`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailChangeToken {
    pub id: i32,
    pub user_id: i32,
    pub new_email: String,
    pub expires_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl EmailChangeToken {
    pub fn from_entity(entity: entity::email_change_token::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            new_email: entity.new_email,
            expires_at: entity.expires_at,
            confirmed_at: entity.confirmed_at,
        }
    }
}

/// Pending password change; the new password is only ever held as a hash.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordChangeToken {
    pub id: i32,
    pub user_id: i32,
    pub new_password_hash: String,
    pub expires_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl PasswordChangeToken {
    pub fn from_entity(entity: entity::password_change_token::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            new_password_hash: entity.new_password_hash,
            expires_at: entity.expires_at,
            confirmed_at: entity.confirmed_at,
        }
    }
}

macro_rules! impl_one_time_token {
    ($($token:ty),+ $(,)?) => {
        $(
            impl OneTimeToken for $token {
                fn expires_at(&self) -> DateTime<Utc> {
                    self.expires_at
                }

                fn confirmed_at(&self) -> Option<DateTime<Utc>> {
                    self.confirmed_at
                }
            }
        )+
    };
}

impl_one_time_token!(EmailVerificationToken, EmailChangeToken, PasswordChangeToken);
