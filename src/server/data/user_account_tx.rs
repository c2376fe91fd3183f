//! Wallet transaction data repository.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use crate::server::model::wallet::{WalletTx, WalletTxFilter};

/// Repository for the wallet ledger.
pub struct UserAccountTxRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserAccountTxRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets one page of transactions across the given accounts, newest first.
    ///
    /// The currency filter is expected to have been applied when selecting the
    /// accounts; this query filters by type and inclusive time bounds. A page past the
    /// last one yields no items but still reports the totals.
    ///
    /// # Arguments
    /// - `account_currencies` - Account ID to currency code of every account to include
    /// - `filter` - Type and time filters
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of transactions per page
    ///
    /// # Returns
    /// - `Ok((txs, total_items, total_pages))` - Page of transactions and totals
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        account_currencies: &HashMap<i32, String>,
        filter: &WalletTxFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<WalletTx>, u64, u64), DbErr> {
        if account_currencies.is_empty() {
            return Ok((Vec::new(), 0, 0));
        }

        let mut query = entity::prelude::UserAccountTx::find().filter(
            entity::user_account_tx::Column::UserAccountId
                .is_in(account_currencies.keys().copied()),
        );

        if let Some(tx_type) = &filter.tx_type {
            query = query.filter(entity::user_account_tx::Column::TxType.eq(tx_type.as_str()));
        }
        if let Some(from) = filter.from {
            query = query.filter(entity::user_account_tx::Column::CreatedAt.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(entity::user_account_tx::Column::CreatedAt.lte(to));
        }

        let paginator = query
            .order_by_desc(entity::user_account_tx::Column::CreatedAt)
            .order_by_desc(entity::user_account_tx::Column::Id)
            .paginate(self.db, per_page);

        let totals = paginator.num_items_and_pages().await?;

        let in_range = page
            .checked_mul(per_page)
            .is_some_and(|offset| offset < totals.number_of_items);
        if !in_range {
            return Ok((Vec::new(), totals.number_of_items, totals.number_of_pages));
        }

        let entities = paginator.fetch_page(page).await?;

        let txs = entities
            .into_iter()
            .map(|entity| {
                let currency = account_currencies
                    .get(&entity.user_account_id)
                    .cloned()
                    .unwrap_or_default();
                WalletTx::from_entity(entity, currency)
            })
            .collect();

        Ok((txs, totals.number_of_items, totals.number_of_pages))
    }
}
