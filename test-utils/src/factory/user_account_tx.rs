//! Wallet ledger entry factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating wallet transactions against an account.
///
/// # Example
///
/// ```rust,ignore
/// let tx = UserAccountTxFactory::new(&db, account.id)
///     .amount(Decimal::new(-10, 0))
///     .tx_type("PURCHASE")
///     .created_at(Utc::now() - Duration::days(1))
///     .build()
///     .await?;
/// ```
pub struct UserAccountTxFactory<'a> {
    db: &'a DatabaseConnection,
    user_account_id: i32,
    public_id: Uuid,
    amount: Decimal,
    tx_type: String,
    ref_type: String,
    ref_id: i64,
    created_at: DateTime<Utc>,
}

impl<'a> UserAccountTxFactory<'a> {
    /// Creates a new factory with default values.
    ///
    /// Defaults:
    /// - public_id: random v4 UUID
    /// - amount: `10`
    /// - tx_type: `"DEPOSIT"`
    /// - ref_type: `"PAYMENT"` with an auto-incremented ref_id
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection, user_account_id: i32) -> Self {
        Self {
            db,
            user_account_id,
            public_id: Uuid::new_v4(),
            amount: Decimal::new(10, 0),
            tx_type: "DEPOSIT".to_string(),
            ref_type: "PAYMENT".to_string(),
            ref_id: next_id() as i64,
            created_at: Utc::now(),
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn tx_type(mut self, tx_type: impl Into<String>) -> Self {
        self.tx_type = tx_type.into();
        self
    }

    pub fn public_id(mut self, public_id: Uuid) -> Self {
        self.public_id = public_id;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the transaction.
    pub async fn build(self) -> Result<entity::user_account_tx::Model, DbErr> {
        entity::user_account_tx::ActiveModel {
            public_id: ActiveValue::Set(self.public_id),
            user_account_id: ActiveValue::Set(self.user_account_id),
            amount: ActiveValue::Set(self.amount),
            tx_type: ActiveValue::Set(self.tx_type),
            ref_type: ActiveValue::Set(self.ref_type),
            ref_id: ActiveValue::Set(self.ref_id),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default deposit on the account.
pub async fn create_tx(
    db: &DatabaseConnection,
    user_account_id: i32,
) -> Result<entity::user_account_tx::Model, DbErr> {
    UserAccountTxFactory::new(db, user_account_id).build().await
}
