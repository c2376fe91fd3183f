use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Balance of a single currency account.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct WalletDto {
    pub balance: Decimal,
    pub reserved: Decimal,
    /// `balance - reserved`
    pub available: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct WalletTxDto {
    pub date_time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub amount: Decimal,
    pub currency: String,
    pub public_id: Uuid,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct PaginatedWalletTxsDto {
    pub items: Vec<WalletTxDto>,
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Query string of the transaction history endpoint.
#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[into_params(parameter_in = Query)]
pub struct WalletTxQuery {
    /// Only transactions of accounts in this currency
    pub currency: Option<String>,
    /// Only transactions of this type
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
    /// Inclusive lower bound on creation time (RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time (RFC 3339)
    pub to: Option<DateTime<Utc>>,
    /// Zero-based page index
    #[serde(default)]
    pub page: u64,
    /// Page size, defaults to 20 and is capped at 100
    pub size: Option<u64>,
}
