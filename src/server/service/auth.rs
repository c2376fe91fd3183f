use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{
        auth::{map_user_constraint_violation, AuthError},
        AppError,
    },
    model::{
        auth::{AuthTokens, RegisterParam, RegistrationOutcome},
        user::{CreateUserParam, User},
    },
    service::{
        email::EmailSender, email_verification::EmailVerificationService, jwt::JwtService,
        refresh_token::RefreshTokenService,
    },
    util::{
        normalize::{normalize_email, normalize_username, require_non_blank},
        password,
    },
};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 24;

/// Service for registration, credential login and session token management.
///
/// Access tokens are short-lived JWTs; sessions are carried by rotating refresh
/// tokens stored hashed in the database.
pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    jwt: &'a JwtService,
    email_sender: &'a dyn EmailSender,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Application configuration (token lifetimes, email settings)
    /// - `jwt` - Access token signer
    /// - `email_sender` - Transport for verification mails
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a Config,
        jwt: &'a JwtService,
        email_sender: &'a dyn EmailSender,
    ) -> Self {
        Self {
            db,
            config,
            jwt,
            email_sender,
        }
    }

    /// Registers a new account.
    ///
    /// Normalizes the input, checks username length and uniqueness of email and
    /// username (both ignoring case), then stores the user. When email verification
    /// is required the account starts inactive and a verification link is mailed.
    /// The user insert, token insert and mail send share one transaction, so a
    /// failed send leaves no account behind.
    ///
    /// # Arguments
    /// - `param` - Raw username, email and password
    ///
    /// # Returns
    /// - `Ok(RegistrationOutcome)` - Whether the account is usable right away
    /// - `Err(AppError::Required)` - A field is blank
    /// - `Err(AuthError::UsernameTooShort | UsernameTooLong)` - Username length out of range
    /// - `Err(AuthError::EmailAlreadyInUse | UsernameAlreadyInUse)` - Duplicate account
    /// - `Err(AppError)` - Database, hashing or mail failure
    #[tracing::instrument(skip_all, fields(username = %param.username), err(level = "warn"))]
    pub async fn register(&self, param: RegisterParam) -> Result<RegistrationOutcome, AppError> {
        let username = normalize_username(&param.username)?;
        let email = normalize_email(&param.email)?;
        let password = require_non_blank(&param.password, "Password")?.to_string();

        let username_length = username.chars().count();
        if username_length < MIN_USERNAME_LENGTH {
            return Err(AuthError::UsernameTooShort(MIN_USERNAME_LENGTH).into());
        }
        if username_length > MAX_USERNAME_LENGTH {
            return Err(AuthError::UsernameTooLong(MAX_USERNAME_LENGTH).into());
        }

        let users = UserRepository::new(self.db);
        if users.email_exists(&email).await? {
            return Err(AuthError::EmailAlreadyInUse.into());
        }
        if users.username_exists(&username).await? {
            return Err(AuthError::UsernameAlreadyInUse.into());
        }

        let password_hash = password::hash(password).await?;
        let verification_required = self.config.email.verification_required;

        let txn = self.db.begin().await?;

        let user = UserRepository::new(&txn)
            .create(CreateUserParam {
                username,
                email,
                password_hash,
                is_active: !verification_required,
            })
            .await
            .map_err(map_user_constraint_violation)?;

        if verification_required {
            EmailVerificationService::new(&txn, &self.config.email, self.email_sender)
                .send_verification(&user)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(user_id = user.id, "Registered user {}", user.username);

        Ok(if verification_required {
            RegistrationOutcome::VerificationRequired
        } else {
            RegistrationOutcome::Registered
        })
    }

    /// Authenticates with email and password.
    ///
    /// # Returns
    /// - `Ok(AuthTokens)` - New access and refresh token
    /// - `Err(AppError::Required)` - Blank email or password
    /// - `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// - `Err(AuthError::EmailNotVerified)` - Correct credentials, account not yet verified
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, AppError> {
        let email = normalize_email(email)?;
        let password = require_non_blank(password, "Password")?.to_string();

        let Some(user) = UserRepository::new(self.db).find_by_email(&email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !password::verify(password, user.password_hash.clone()).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::EmailNotVerified.into());
        }

        tracing::debug!(user_id = user.id, "User logged in");

        self.issue_tokens(self.db, &user).await
    }

    /// Exchanges a refresh token for a new token pair, revoking the presented token.
    ///
    /// # Returns
    /// - `Ok(AuthTokens)` - New access token and rotated refresh token
    /// - `Err(TokenError)` - Missing, unknown, revoked or expired refresh token (401)
    /// - `Err(AuthError::UserInactive)` - Token owner is not active (401)
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn refresh(&self, raw: Option<&str>) -> Result<AuthTokens, AppError> {
        let txn = self.db.begin().await?;
        let refresh_tokens = RefreshTokenService::new(&txn, self.config.jwt.refresh_token_ttl);

        let stored = refresh_tokens.get_valid(raw).await?;

        let user = UserRepository::new(&txn)
            .find_by_id(stored.user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or(AuthError::UserInactive)?;

        let access_token = self.jwt.generate(user.id)?;
        let refresh_token = refresh_tokens.rotate(&stored).await?;

        txn.commit().await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
        })
    }

    /// Revokes the presented refresh token; absent or unknown tokens are ignored.
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn logout(&self, raw: Option<&str>) -> Result<(), AppError> {
        RefreshTokenService::new(self.db, self.config.jwt.refresh_token_ttl)
            .revoke(raw)
            .await
    }

    /// Verifies an email address and logs the user in.
    ///
    /// # Returns
    /// - `Ok(AuthTokens)` - Tokens for the now active user
    /// - `Err(TokenError)` - Blank, unknown (400) or expired (410) verification token
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn verify_email(&self, raw: &str) -> Result<AuthTokens, AppError> {
        let txn = self.db.begin().await?;

        let user = EmailVerificationService::new(&txn, &self.config.email, self.email_sender)
            .verify(raw)
            .await?;
        let tokens = self.issue_tokens(&txn, &user).await?;

        txn.commit().await?;

        Ok(tokens)
    }

    /// Mails a new verification link if the address belongs to an unverified account.
    ///
    /// Always succeeds for unknown or verified addresses so callers cannot discover which accounts exist.
    #[tracing::instrument(skip_all, err(level = "warn"))]
    pub async fn resend_verification(&self, email: &str) -> Result<(), AppError> {
        let txn = self.db.begin().await?;

        EmailVerificationService::new(&txn, &self.config.email, self.email_sender)
            .resend(email)
            .await?;

        txn.commit().await?;

        Ok(())
    }

    async fn issue_tokens<C: ConnectionTrait>(
        &self,
        db: &C,
        user: &User,
    ) -> Result<AuthTokens, AppError> {
        let access_token = self.jwt.generate(user.id)?;
        let refresh_token = RefreshTokenService::new(db, self.config.jwt.refresh_token_ttl)
            .issue(user.id)
            .await?;

        tracing::debug!(user_id = user.id, "Issued token pair");

        Ok(AuthTokens {
            access_token,
            refresh_token,
        })
    }
}
