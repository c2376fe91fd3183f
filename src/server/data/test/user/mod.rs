use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{
        auth::{map_user_constraint_violation, AuthError},
        AppError,
    },
    model::user::CreateUserParam,
    startup::connect_to_database,
};
use sea_orm::{DatabaseConnection, DbErr};
use test_utils::{builder::TestBuilder, factory};

/// Database with the real migrations applied, including constraints that entity-built
/// test tables lack.
async fn migrated_db() -> DatabaseConnection {
    connect_to_database(&Config::for_tests()).await.unwrap()
}

fn auth_err(err: DbErr) -> AuthError {
    match map_user_constraint_violation(err) {
        AppError::AuthErr(err) => err,
        e => panic!("Expected AuthErr, got: {:?}", e),
    }
}

mod create;
mod exists;
mod find;
mod update;
