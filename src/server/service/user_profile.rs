//! Self-service profile changes gated by emailed confirmation links.
//!
//! A change request verifies the current password, parks the new value on a one-time
//! token and mails the link. Confirming the token applies the change. Each user has at
//! most one pending request of each kind: a new request deletes the older tokens.

use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    config::EmailConfig,
    data::{
        email_change_token::EmailChangeTokenRepository,
        password_change_token::PasswordChangeTokenRepository, user::UserRepository,
    },
    error::{
        auth::{map_user_constraint_violation, AuthError},
        token::{TokenError, TokenKind},
        AppError,
    },
    model::{token::OneTimeToken, user::User},
    service::email::{EmailMessage, EmailSender},
    util::{
        normalize::{normalize_email, require_non_blank},
        password,
        token::{build_link, generate_raw_token, hash_token},
    },
};

pub const EMAIL_CHANGE_SUBJECT: &str = "Confirm your email change";
pub const PASSWORD_CHANGE_SUBJECT: &str = "Confirm your password change";

pub struct UserProfileService<'a> {
    db: &'a DatabaseConnection,
    config: &'a EmailConfig,
    email_sender: &'a dyn EmailSender,
}

impl<'a> UserProfileService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a EmailConfig,
        email_sender: &'a dyn EmailSender,
    ) -> Self {
        Self {
            db,
            config,
            email_sender,
        }
    }

    /// Starts an email change and mails the confirmation link to the new address.
    ///
    /// # Arguments
    /// - `user` - Authenticated user
    /// - `new_email` - Requested address, normalized before use
    /// - `current_password` - Password re-entered by the user
    ///
    /// # Returns
    /// - `Ok(())` - Token stored and confirmation mail sent
    /// - `Err(AppError::Required)` - Blank email or current password
    /// - `Err(AuthError::InvalidCredentials)` - Wrong current password
    /// - `Err(AuthError::EmailSameAsCurrent)` - New address equals the current one
    /// - `Err(AuthError::EmailAlreadyInUse)` - Address belongs to another account
    #[tracing::instrument(skip_all, fields(user_id = user.id), err(level = "warn"))]
    pub async fn request_email_change(
        &self,
        user: &User,
        new_email: &str,
        current_password: &str,
    ) -> Result<(), AppError> {
        let new_email = normalize_email(new_email)?;
        verify_current_password(user, current_password).await?;

        if new_email == user.email.to_lowercase() {
            return Err(AuthError::EmailSameAsCurrent.into());
        }
        if UserRepository::new(self.db).email_exists(&new_email).await? {
            return Err(AuthError::EmailAlreadyInUse.into());
        }

        let raw = generate_raw_token();
        let expires_at = Utc::now() + self.config.change_email_ttl;

        let txn = self.db.begin().await?;

        let tokens = EmailChangeTokenRepository::new(&txn);
        tokens.delete_by_user(user.id).await?;
        tokens
            .create(user.id, hash_token(&raw), new_email.clone(), expires_at)
            .await?;

        let link = build_link(&self.config.change_email_base_url, &raw);
        self.email_sender
            .send(&EmailMessage {
                to: new_email,
                subject: EMAIL_CHANGE_SUBJECT.to_string(),
                body: format!(
                    "Please confirm your email change by clicking the link: {}",
                    link
                ),
            })
            .await?;

        txn.commit().await?;

        tracing::info!(user_id = user.id, "Requested email change");
        Ok(())
    }

    /// Applies a pending email change.
    ///
    /// A token that was already confirmed is accepted without changing anything.
    ///
    /// # Returns
    /// - `Ok(())` - Email updated, or token already used
    /// - `Err(TokenError)` - Blank or unknown (400) or expired (410) token
    /// - `Err(AuthError::EmailAlreadyInUse)` - Another account took the address meanwhile
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn confirm_email_change(&self, raw: &str) -> Result<(), AppError> {
        if raw.trim().is_empty() {
            return Err(TokenError::Required(TokenKind::EmailChange).into());
        }

        let txn = self.db.begin().await?;

        let tokens = EmailChangeTokenRepository::new(&txn);
        let token = tokens
            .find_by_hash(&hash_token(raw))
            .await?
            .ok_or(TokenError::Invalid(TokenKind::EmailChange))?;

        let now = Utc::now();
        if token.is_expired(now) {
            return Err(TokenError::Expired(TokenKind::EmailChange).into());
        }
        if token.is_confirmed() {
            return Ok(());
        }

        let users = UserRepository::new(&txn);
        let user = users
            .find_by_id(token.user_id)
            .await?
            .ok_or(TokenError::Invalid(TokenKind::EmailChange))?;

        if token.new_email != user.email && users.email_exists(&token.new_email).await? {
            return Err(AuthError::EmailAlreadyInUse.into());
        }

        users
            .update_email(user.id, &token.new_email)
            .await
            .map_err(map_user_constraint_violation)?;
        tokens.confirm(token.id, now).await?;

        txn.commit().await?;

        tracing::info!(user_id = user.id, "Changed email address");
        Ok(())
    }

    /// Starts a password change and mails the confirmation link to the current address.
    ///
    /// The new password is hashed immediately; only the hash is stored on the token.
    ///
    /// # Returns
    /// - `Ok(())` - Token stored and confirmation mail sent
    /// - `Err(AppError::Required)` - Blank current or new password
    /// - `Err(AuthError::InvalidCredentials)` - Wrong current password
    /// - `Err(AuthError::PasswordSameAsCurrent)` - New password equals the current one
    #[tracing::instrument(skip_all, fields(user_id = user.id), err(level = "warn"))]
    pub async fn request_password_change(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        verify_current_password(user, current_password).await?;
        let new_password = require_non_blank(new_password, "New password")?.to_string();

        if password::verify(new_password.clone(), user.password_hash.clone()).await? {
            return Err(AuthError::PasswordSameAsCurrent.into());
        }

        let new_password_hash = password::hash(new_password).await?;
        let raw = generate_raw_token();
        let expires_at = Utc::now() + self.config.change_password_ttl;

        let txn = self.db.begin().await?;

        let tokens = PasswordChangeTokenRepository::new(&txn);
        tokens.delete_by_user(user.id).await?;
        tokens
            .create(user.id, hash_token(&raw), new_password_hash, expires_at)
            .await?;

        let link = build_link(&self.config.change_password_base_url, &raw);
        self.email_sender
            .send(&EmailMessage {
                to: user.email.clone(),
                subject: PASSWORD_CHANGE_SUBJECT.to_string(),
                body: format!(
                    "Please confirm your password change by clicking the link: {}",
                    link
                ),
            })
            .await?;

        txn.commit().await?;

        tracing::info!(user_id = user.id, "Requested password change");
        Ok(())
    }

    /// Applies a pending password change.
    ///
    /// # Returns
    /// - `Ok(())` - Password hash replaced, or token already used
    /// - `Err(TokenError)` - Blank or unknown (400) or expired (410) token
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn confirm_password_change(&self, raw: &str) -> Result<(), AppError> {
        if raw.trim().is_empty() {
            return Err(TokenError::Required(TokenKind::PasswordChange).into());
        }

        let txn = self.db.begin().await?;

        let tokens = PasswordChangeTokenRepository::new(&txn);
        let token = tokens
            .find_by_hash(&hash_token(raw))
            .await?
            .ok_or(TokenError::Invalid(TokenKind::PasswordChange))?;

        let now = Utc::now();
        if token.is_expired(now) {
            return Err(TokenError::Expired(TokenKind::PasswordChange).into());
        }
        if token.is_confirmed() {
            return Ok(());
        }

        UserRepository::new(&txn)
            .update_password_hash(token.user_id, &token.new_password_hash)
            .await?;
        tokens.confirm(token.id, now).await?;

        txn.commit().await?;

        tracing::info!(user_id = token.user_id, "Changed password");
        Ok(())
    }
}

/// Checks the re-entered password of an authenticated user.
async fn verify_current_password(user: &User, current_password: &str) -> Result<(), AppError> {
    let current_password = require_non_blank(current_password, "Current password")?.to_string();

    if !password::verify(current_password, user.password_hash.clone()).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    Ok(())
}
