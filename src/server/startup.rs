use std::sync::Arc;

use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::server::{
    config::Config,
    error::AppError,
    service::email::{EmailSender, LogEmailSender, ResendEmailSender},
};

const DEFAULT_LOG_FILTER: &str = "info,tower_http=info,sqlx=warn";

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG` when set, otherwise falls back to `info` with SQL noise suppressed.
/// Service calls are instrumented, so entering and closing their spans is logged with
/// the recorded ids and the elapsed time.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .init();
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the schema is up-to-date before the server
/// accepts requests. Both Postgres and SQLite URLs are accepted.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Chooses the mail transport.
///
/// Uses Resend when an API key is configured, otherwise a sender that only logs
/// messages so local setups work without credentials.
pub fn build_email_sender(config: &Config) -> Arc<dyn EmailSender> {
    let from = config.email.sender();

    match &config.resend_api_key {
        Some(api_key) => {
            tracing::info!("Sending mail through Resend as {}", from);
            Arc::new(ResendEmailSender::new(api_key, from))
        }
        None => {
            tracing::warn!("RESEND_API_KEY not set, mail will only be logged");
            Arc::new(LogEmailSender::new(from))
        }
    }
}

/// Builds the CORS layer from the configured origin allow-list.
///
/// Credentials are allowed so browsers send the refresh cookie. With no configured
/// origins, cross-origin requests are not granted.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true)
}
