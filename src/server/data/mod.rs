//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//!
//! Every repository is generic over `ConnectionTrait`, so the same code runs against the
//! shared `DatabaseConnection` or inside a `DatabaseTransaction` when a service needs
//! several writes to commit atomically.

pub mod email_change_token;
pub mod email_verification_token;
pub mod password_change_token;
pub mod refresh_token;
pub mod user;
pub mod user_account;
pub mod user_account_tx;

#[cfg(test)]
mod test;
