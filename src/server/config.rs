use chrono::Duration;
use std::{fmt::Display, str::FromStr};
use url::Url;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 900;
const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 2_592_000;
const DEFAULT_REFRESH_COOKIE_NAME: &str = "refresh_token";
const DEFAULT_REFRESH_COOKIE_PATH: &str = "/api/auth";
const DEFAULT_VERIFICATION_TTL_SECS: i64 = 86_400;
const DEFAULT_CHANGE_EMAIL_TTL_SECS: i64 = 3_600;
const DEFAULT_CHANGE_PASSWORD_TTL_SECS: i64 = 3_600;

/// HMAC-SHA256 keys shorter than this are rejected at startup.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

pub struct Config {
    pub database_url: String,
    pub bind_address: String,

    pub jwt: JwtConfig,
    pub refresh_cookie: RefreshCookieConfig,
    pub email: EmailConfig,

    /// Resend API key; when absent, mail is written to the log instead of sent.
    pub resend_api_key: Option<String>,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl From<SameSite> for cookie::SameSite {
    fn from(value: SameSite) -> Self {
        match value {
            SameSite::Strict => cookie::SameSite::Strict,
            SameSite::Lax => cookie::SameSite::Lax,
            SameSite::None => cookie::SameSite::None,
        }
    }
}

impl FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lax" => Ok(Self::Lax),
            "none" => Ok(Self::None),
            other => Err(format!("expected Strict, Lax or None, got '{}'", other)),
        }
    }
}

/// Attributes of the HttpOnly cookie carrying the refresh token.
#[derive(Clone)]
pub struct RefreshCookieConfig {
    pub name: String,
    pub path: String,
    pub same_site: SameSite,
    pub secure: bool,
}

#[derive(Clone)]
pub struct EmailConfig {
    pub from: String,
    pub from_name: Option<String>,
    /// When false, registration activates accounts immediately.
    pub verification_required: bool,
    pub verification_base_url: String,
    pub change_email_base_url: String,
    pub change_password_base_url: String,
    pub verification_ttl: Duration,
    pub change_email_ttl: Duration,
    pub change_password_ttl: Duration,
}

impl EmailConfig {
    /// Sender in `Name <address>` form when a display name is configured.
    pub fn sender(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from),
            None => self.from.clone(),
        }
    }
}

impl Config {
    /// Loads configuration from process environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr(MissingEnvVar))` - A required variable is not set
    /// - `Err(AppError::ConfigErr(InvalidEnvVar))` - A variable could not be parsed
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable by name
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let secret = env.required("JWT_SECRET")?;
        if secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::InvalidEnvVar {
                name: "JWT_SECRET".to_string(),
                reason: format!("must be at least {} bytes", MIN_JWT_SECRET_BYTES),
            }
            .into());
        }

        Ok(Self {
            database_url: env.required("DATABASE_URL")?,
            bind_address: env
                .optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            jwt: JwtConfig {
                secret,
                access_token_ttl: env
                    .seconds_or("JWT_ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?,
                refresh_token_ttl: env
                    .seconds_or("JWT_REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS)?,
            },
            refresh_cookie: RefreshCookieConfig {
                name: env
                    .optional("REFRESH_COOKIE_NAME")
                    .unwrap_or_else(|| DEFAULT_REFRESH_COOKIE_NAME.to_string()),
                path: env
                    .optional("REFRESH_COOKIE_PATH")
                    .unwrap_or_else(|| DEFAULT_REFRESH_COOKIE_PATH.to_string()),
                same_site: env.parse_or("REFRESH_COOKIE_SAME_SITE", SameSite::Lax)?,
                secure: env.parse_or("REFRESH_COOKIE_SECURE", true)?,
            },
            email: EmailConfig {
                from: env.required("EMAIL_FROM")?,
                from_name: env.optional("EMAIL_FROM_NAME"),
                verification_required: env.parse_or("EMAIL_VERIFICATION_REQUIRED", true)?,
                verification_base_url: env.url("EMAIL_VERIFICATION_BASE_URL")?,
                change_email_base_url: env.url("EMAIL_CHANGE_BASE_URL")?,
                change_password_base_url: env.url("PASSWORD_CHANGE_BASE_URL")?,
                verification_ttl: env
                    .seconds_or("EMAIL_VERIFICATION_TTL_SECS", DEFAULT_VERIFICATION_TTL_SECS)?,
                change_email_ttl: env
                    .seconds_or("EMAIL_CHANGE_TTL_SECS", DEFAULT_CHANGE_EMAIL_TTL_SECS)?,
                change_password_ttl: env
                    .seconds_or("PASSWORD_CHANGE_TTL_SECS", DEFAULT_CHANGE_PASSWORD_TTL_SECS)?,
            },
            resend_api_key: env.optional("RESEND_API_KEY"),
            cors_allowed_origins: env
                .optional("CORS_ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.optional(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn parse_or<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(name) {
            Some(value) => value.trim().parse().map_err(|e: T::Err| invalid(name, e)),
            None => Ok(default),
        }
    }

    fn seconds_or(&self, name: &str, default: i64) -> Result<Duration, ConfigError> {
        let secs: i64 = self.parse_or(name, default)?;
        if secs <= 0 {
            return Err(invalid(name, "must be a positive number of seconds"));
        }
        Ok(Duration::seconds(secs))
    }

    fn url(&self, name: &str) -> Result<String, ConfigError> {
        let value = self.required(name)?;
        Url::parse(&value).map_err(|e| invalid(name, e))?;
        Ok(value)
    }
}

fn invalid(name: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by unit and router tests.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            jwt: JwtConfig {
                secret: "test-secret-test-secret-test-secret!".to_string(),
                access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS),
                refresh_token_ttl: Duration::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECS),
            },
            refresh_cookie: RefreshCookieConfig {
                name: DEFAULT_REFRESH_COOKIE_NAME.to_string(),
                path: DEFAULT_REFRESH_COOKIE_PATH.to_string(),
                same_site: SameSite::Lax,
                secure: true,
            },
            email: EmailConfig {
                from: "no-reply@primemarket.test".to_string(),
                from_name: Some("PrimeMarket".to_string()),
                verification_required: true,
                verification_base_url: "https://app.primemarket.test/verify-email".to_string(),
                change_email_base_url: "https://app.primemarket.test/confirm-email?source=mail"
                    .to_string(),
                change_password_base_url: "https://app.primemarket.test/confirm-password"
                    .to_string(),
                verification_ttl: Duration::seconds(DEFAULT_VERIFICATION_TTL_SECS),
                change_email_ttl: Duration::seconds(DEFAULT_CHANGE_EMAIL_TTL_SECS),
                change_password_ttl: Duration::seconds(DEFAULT_CHANGE_PASSWORD_TTL_SECS),
            },
            resend_api_key: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}
