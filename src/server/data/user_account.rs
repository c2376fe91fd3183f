//! Wallet account data repository.

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::server::model::wallet::WalletAccount;

/// Repository for per-currency wallet accounts.
pub struct UserAccountRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserAccountRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the user's accounts ordered by currency code.
    ///
    /// # Arguments
    /// - `user_id` - Owner of the accounts
    /// - `currency_code` - Restrict to a single currency when set
    ///
    /// # Returns
    /// - `Ok(Vec<WalletAccount>)` - Matching accounts (empty if none)
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_user(
        &self,
        user_id: i32,
        currency_code: Option<&str>,
    ) -> Result<Vec<WalletAccount>, DbErr> {
        let mut query = entity::prelude::UserAccount::find()
            .filter(entity::user_account::Column::UserId.eq(user_id));

        if let Some(currency_code) = currency_code {
            query = query.filter(entity::user_account::Column::CurrencyCode.eq(currency_code));
        }

        let entities = query
            .order_by_asc(entity::user_account::Column::CurrencyCode)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(WalletAccount::from_entity).collect())
    }
}
