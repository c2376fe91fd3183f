//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through
//! Axum's state extraction. All fields are cheap to clone: the connection pool and the
//! configuration are shared, the JWT keys are small and the mail sender sits behind
//! an `Arc`.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{
    config::Config,
    service::{email::EmailSender, jwt::JwtService},
};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Configuration parsed from the environment at startup.
    pub config: Arc<Config>,

    /// Access token signer and verifier.
    pub jwt: JwtService,

    /// Mail transport for verification and confirmation links.
    pub email_sender: Arc<dyn EmailSender>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Application configuration
    /// - `email_sender` - Mail transport
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection, config: Config, email_sender: Arc<dyn EmailSender>) -> Self {
        let jwt = JwtService::new(&config.jwt);
        Self {
            db,
            config: Arc::new(config),
            jwt,
            email_sender,
        }
    }
}
