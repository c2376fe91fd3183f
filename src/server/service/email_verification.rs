use chrono::Utc;
use sea_orm::ConnectionTrait;

use crate::server::{
    config::EmailConfig,
    data::{email_verification_token::EmailVerificationTokenRepository, user::UserRepository},
    error::{
        token::{TokenError, TokenKind},
        AppError,
    },
    model::{token::OneTimeToken, user::User},
    service::email::{EmailMessage, EmailSender},
    util::{
        normalize::normalize_email,
        token::{build_link, generate_raw_token, hash_token},
    },
};

pub const VERIFICATION_SUBJECT: &str = "Confirm your email";

/// Email address verification for newly registered accounts.
///
/// Each method performs several writes; callers run it on a transaction so a
/// failed mail send rolls the new token back.
pub struct EmailVerificationService<'a, C: ConnectionTrait> {
    db: &'a C,
    config: &'a EmailConfig,
    email_sender: &'a dyn EmailSender,
}

impl<'a, C: ConnectionTrait> EmailVerificationService<'a, C> {
    pub fn new(db: &'a C, config: &'a EmailConfig, email_sender: &'a dyn EmailSender) -> Self {
        Self {
            db,
            config,
            email_sender,
        }
    }

    /// Replaces the user's verification tokens with a fresh one and mails the link.
    ///
    /// Does nothing for users that are already active.
    ///
    /// # Returns
    /// - `Ok(())` - Token stored and mail accepted, or user already active
    /// - `Err(AppError)` - Database or mail transport failure
    #[tracing::instrument(skip_all, fields(user_id = user.id), err(level = "warn"))]
    pub async fn send_verification(&self, user: &User) -> Result<(), AppError> {
        if user.is_active {
            return Ok(());
        }

        let repo = EmailVerificationTokenRepository::new(self.db);
        repo.delete_by_user(user.id).await?;

        let raw = generate_raw_token();
        let expires_at = Utc::now() + self.config.verification_ttl;
        repo.create(user.id, hash_token(&raw), expires_at).await?;

        let link = build_link(&self.config.verification_base_url, &raw);
        let message = EmailMessage {
            to: user.email.clone(),
            subject: VERIFICATION_SUBJECT.to_string(),
            body: format!("Please confirm your email by clicking the link: {}", link),
        };
        self.email_sender.send(&message).await?;

        tracing::info!(user_id = user.id, "Sent email verification link");
        Ok(())
    }

    /// Confirms a verification token and activates its user.
    ///
    /// A token that was already confirmed still succeeds as long as it has not
    /// expired, so following the link twice is harmless.
    ///
    /// # Returns
    /// - `Ok(User)` - The now active user
    /// - `Err(TokenError::Required | Invalid)` - Blank or unknown token (400)
    /// - `Err(TokenError::Expired)` - Token past its expiry (410)
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn verify(&self, raw: &str) -> Result<User, AppError> {
        if raw.trim().is_empty() {
            return Err(TokenError::Required(TokenKind::Verification).into());
        }

        let repo = EmailVerificationTokenRepository::new(self.db);
        let token = repo
            .find_by_hash(&hash_token(raw))
            .await?
            .ok_or(TokenError::Invalid(TokenKind::Verification))?;

        let now = Utc::now();
        if token.is_expired(now) {
            return Err(TokenError::Expired(TokenKind::Verification).into());
        }

        if !token.is_confirmed() {
            repo.confirm(token.id, now).await?;
        }

        let users = UserRepository::new(self.db);
        let mut user = users
            .find_by_id(token.user_id)
            .await?
            .ok_or(TokenError::Invalid(TokenKind::Verification))?;

        if !user.is_active {
            users.activate(user.id).await?;
            user.is_active = true;
            tracing::info!(user_id = user.id, "Verified email address");
        }

        Ok(user)
    }

    /// Sends a new verification link to an inactive account.
    ///
    /// Blank, unknown and already verified addresses are silently ignored so the
    /// response never reveals whether an account exists.
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn resend(&self, email: &str) -> Result<(), AppError> {
        let email = match normalize_email(email) {
            Ok(email) => email,
            Err(AppError::Required(_)) => return Ok(()),
            Err(e) => return Err(e),
        };

        match UserRepository::new(self.db).find_by_email(&email).await? {
            Some(user) if !user.is_active => self.send_verification(&user).await,
            _ => Ok(()),
        }
    }
}
