use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::collections::{BTreeMap, HashMap};

use crate::server::{
    data::{user_account::UserAccountRepository, user_account_tx::UserAccountTxRepository},
    error::AppError,
    model::wallet::{GetWalletTxsParam, PaginatedWalletTxs, WalletAccount},
};

/// Read-only access to a user's wallet balances and ledger.
pub struct WalletService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WalletService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the user's accounts that hold a positive balance, keyed and ordered by currency.
    #[tracing::instrument(skip_all, fields(user_id = user_id), err(level = "warn"))]
    pub async fn accounts_with_positive_balance(
        &self,
        user_id: i32,
    ) -> Result<BTreeMap<String, WalletAccount>, AppError> {
        let accounts = UserAccountRepository::new(self.db)
            .get_by_user(user_id, None)
            .await?;

        Ok(accounts
            .into_iter()
            .filter(|account| account.balance > Decimal::ZERO)
            .map(|account| (account.currency_code.clone(), account))
            .collect())
    }

    /// Gets one page of the user's transaction history, newest first.
    ///
    /// # Arguments
    /// - `param` - Owner, optional filters and zero-based page
    ///
    /// # Returns
    /// - `Ok(PaginatedWalletTxs)` - Page of transactions with totals; empty when the
    ///   user has no account in the requested currency
    /// - `Err(AppError::DbErr)` - Database error
    #[tracing::instrument(
        skip_all,
        fields(user_id = param.user_id, page = param.page, size = param.size),
        err(level = "warn")
    )]
    pub async fn transactions(
        &self,
        param: GetWalletTxsParam,
    ) -> Result<PaginatedWalletTxs, AppError> {
        let accounts: HashMap<i32, String> = UserAccountRepository::new(self.db)
            .get_by_user(param.user_id, param.filter.currency.as_deref())
            .await?
            .into_iter()
            .map(|account| (account.id, account.currency_code))
            .collect();

        let (items, total_items, total_pages) = UserAccountTxRepository::new(self.db)
            .get_paginated(&accounts, &param.filter, param.page, param.size)
            .await?;

        Ok(PaginatedWalletTxs {
            items,
            page: param.page,
            size: param.size,
            total_items,
            total_pages,
        })
    }
}
