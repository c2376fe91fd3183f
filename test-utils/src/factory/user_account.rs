//! Wallet account factory.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating per-currency wallet accounts.
///
/// # Example
///
/// ```rust,ignore
/// let account = UserAccountFactory::new(&db, user.id, "EUR")
///     .balance(Decimal::new(15025, 2))
///     .reserved(Decimal::new(25, 0))
///     .build()
///     .await?;
/// ```
pub struct UserAccountFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    currency_code: String,
    balance: Decimal,
    reserved: Decimal,
}

impl<'a> UserAccountFactory<'a> {
    /// Creates a new factory for an empty account.
    ///
    /// Defaults:
    /// - balance: `0`
    /// - reserved: `0`
    pub fn new(db: &'a DatabaseConnection, user_id: i32, currency_code: impl Into<String>) -> Self {
        Self {
            db,
            user_id,
            currency_code: currency_code.into(),
            balance: Decimal::ZERO,
            reserved: Decimal::ZERO,
        }
    }

    pub fn balance(mut self, balance: Decimal) -> Self {
        self.balance = balance;
        self
    }

    pub fn reserved(mut self, reserved: Decimal) -> Self {
        self.reserved = reserved;
        self
    }

    /// Builds and inserts the account.
    ///
    /// # Returns
    /// - `Ok(entity::user_account::Model)` - Created account
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user_account::Model, DbErr> {
        entity::user_account::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            currency_code: ActiveValue::Set(self.currency_code),
            balance: ActiveValue::Set(self.balance),
            reserved: ActiveValue::Set(self.reserved),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an empty account for the user in the given currency.
pub async fn create_account(
    db: &DatabaseConnection,
    user_id: i32,
    currency_code: &str,
) -> Result<entity::user_account::Model, DbErr> {
    UserAccountFactory::new(db, user_id, currency_code)
        .build()
        .await
}
