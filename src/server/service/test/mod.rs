use crate::server::{
    config::Config,
    error::{
        auth::AuthError,
        token::{TokenError, TokenKind},
        AppError,
    },
    model::user::User,
    service::{
        auth::AuthService, email::RecordingEmailSender, jwt::JwtService,
        user_profile::UserProfileService,
    },
};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};


/// Configuration, signer and recording mail transport shared by service tests.
struct Services {
    config: Config,
    jwt: JwtService,
    mail: RecordingEmailSender,
}

impl Services {
    fn new() -> Self {
        Self::with_config(Config::for_tests())
    }

    fn with_config(config: Config) -> Self {
        let jwt = JwtService::new(&config.jwt);
        Self {
            config,
            jwt,
            mail: RecordingEmailSender::default(),
        }
    }

    fn auth<'a>(&'a self, db: &'a DatabaseConnection) -> AuthService<'a> {
        AuthService::new(db, &self.config, &self.jwt, &self.mail)
    }

    fn profile<'a>(&'a self, db: &'a DatabaseConnection) -> UserProfileService<'a> {
        UserProfileService::new(db, &self.config.email, &self.mail)
    }
}

fn token_err(err: AppError) -> TokenError {
    match err {
        AppError::TokenErr(err) => err,
        e => panic!("Expected TokenErr, got: {:?}", e),
    }
}

fn auth_err(err: AppError) -> AuthError {
    match err {
        AppError::AuthErr(err) => err,
        e => panic!("Expected AuthErr, got: {:?}", e),
    }
}
