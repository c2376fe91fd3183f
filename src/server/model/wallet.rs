//! Wallet domain models: per-currency balances and their ledger entries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::model::wallet::{PaginatedWalletTxsDto, WalletDto, WalletTxDto};

/// Default and maximum page sizes of the transaction history.
pub const DEFAULT_TX_PAGE_SIZE: u64 = 20;
pub const MAX_TX_PAGE_SIZE: u64 = 100;

/// Balance of one currency account.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletAccount {
    pub id: i32,
    pub currency_code: String,
    pub balance: Decimal,
    /// Amount held for pending operations, not spendable.
    pub reserved: Decimal,
}

impl WalletAccount {
    pub fn available(&self) -> Decimal {
        self.balance - self.reserved
    }

    pub fn into_dto(self) -> WalletDto {
        WalletDto {
            available: self.available(),
            balance: self.balance,
            reserved: self.reserved,
        }
    }

    pub fn from_entity(entity: entity::user_account::Model) -> Self {
        Self {
            id: entity.id,
            currency_code: entity.currency_code,
            balance: entity.balance,
            reserved: entity.reserved,
        }
    }
}

/// Ledger entry joined with the currency of its account.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletTx {
    pub public_id: Uuid,
    pub tx_type: String,
    pub amount: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl WalletTx {
    pub fn into_dto(self) -> WalletTxDto {
        WalletTxDto {
            date_time: self.created_at,
            tx_type: self.tx_type,
            amount: self.amount,
            currency: self.currency,
            public_id: self.public_id,
        }
    }

    /// Builds the domain model from a ledger row and its account's currency code.
    pub fn from_entity(entity: entity::user_account_tx::Model, currency: String) -> Self {
        Self {
            public_id: entity.public_id,
            tx_type: entity.tx_type,
            amount: entity.amount,
            currency,
            created_at: entity.created_at,
        }
    }
}

/// Optional filters of the transaction history; `from`/`to` are inclusive.
#[derive(Debug, Clone, Default)]
pub struct WalletTxFilter {
    pub currency: Option<String>,
    pub tx_type: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Parameters for fetching one page of a user's transaction history.
#[derive(Debug, Clone)]
pub struct GetWalletTxsParam {
    pub user_id: i32,
    pub filter: WalletTxFilter,
    /// Zero-based page index.
    pub page: u64,
    pub size: u64,
}

impl GetWalletTxsParam {
    /// Builds parameters from the query DTO, defaulting and clamping the page size.
    pub fn from_dto(user_id: i32, query: crate::model::wallet::WalletTxQuery) -> Self {
        let size = query
            .size
            .unwrap_or(DEFAULT_TX_PAGE_SIZE)
            .clamp(1, MAX_TX_PAGE_SIZE);

        Self {
            user_id,
            filter: WalletTxFilter {
                currency: query.currency.filter(|c| !c.trim().is_empty()),
                tx_type: query.tx_type.filter(|t| !t.trim().is_empty()),
                from: query.from,
                to: query.to,
            },
            page: query.page,
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedWalletTxs {
    pub items: Vec<WalletTx>,
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl PaginatedWalletTxs {
    pub fn into_dto(self) -> PaginatedWalletTxsDto {
        PaginatedWalletTxsDto {
            items: self.items.into_iter().map(WalletTx::into_dto).collect(),
            page: self.page,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
