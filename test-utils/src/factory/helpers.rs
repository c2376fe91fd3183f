//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Generates a unique placeholder token hash.
///
/// The value has the same shape as a real SHA-256 hex digest so it satisfies
/// column length constraints, but it does not correspond to any raw token.
pub fn unique_token_hash() -> String {
    format!("{:064x}", next_id())
}

/// Creates an active user holding a single wallet account.
///
/// # Arguments
/// - `db` - Database connection
/// - `currency_code` - Currency of the account
/// - `balance` - Initial account balance
///
/// # Returns
/// - `Ok((user, account))` - Created user and account
/// - `Err(DbErr)` - Database error during creation
pub async fn create_user_with_account(
    db: &DatabaseConnection,
    currency_code: &str,
    balance: Decimal,
) -> Result<(entity::user::Model, entity::user_account::Model), DbErr> {
    let user = crate::factory::user::create_user(db).await?;
    let account = crate::factory::user_account::UserAccountFactory::new(db, user.id, currency_code)
        .balance(balance)
        .build()
        .await?;

    Ok((user, account))
}
