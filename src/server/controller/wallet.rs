use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::collections::BTreeMap;

use crate::{
    model::{
        api::ProblemDto,
        wallet::{PaginatedWalletTxsDto, WalletDto, WalletTxQuery},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::wallet::{GetWalletTxsParam, WalletAccount},
        service::wallet::WalletService,
        state::AppState,
    },
};

/// Tag for grouping wallet endpoints in OpenAPI documentation
pub static WALLET_TAG: &str = "wallet";

/// Get the authenticated user's wallet balances.
///
/// Only currencies with a positive balance are included, keyed by currency code.
///
/// # Access Control
/// - Requires a bearer access token of an active user
///
/// # Returns
/// - `200 OK` - Map of currency code to balance, reserved and available amounts
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/api/wallets/me",
    tag = WALLET_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Balances by currency", body = BTreeMap<String, WalletDto>),
        (status = 401, description = "Not authenticated", body = ProblemDto)
    ),
)]
pub async fn get_my_wallets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    let accounts = WalletService::new(&state.db)
        .accounts_with_positive_balance(user.id)
        .await?;

    let body: BTreeMap<String, WalletDto> = accounts
        .into_iter()
        .map(|(currency, account)| (currency, WalletAccount::into_dto(account)))
        .collect();

    Ok((StatusCode::OK, Json(body)))
}

/// Get the authenticated user's wallet transactions, newest first.
///
/// # Access Control
/// - Requires a bearer access token of an active user
///
/// # Arguments
/// - `query` - Optional currency, type and inclusive RFC 3339 time range, plus
///   zero-based `page` and `size` (default 20, at most 100)
///
/// # Returns
/// - `200 OK` - Page of transactions with totals
/// - `400 Bad Request` - Unparsable query parameters
/// - `401 Unauthorized` - Not authenticated
#[utoipa::path(
    get,
    path = "/api/wallets/me/txs",
    tag = WALLET_TAG,
    security(("bearer_auth" = [])),
    params(WalletTxQuery),
    responses(
        (status = 200, description = "Page of transactions", body = PaginatedWalletTxsDto),
        (status = 400, description = "Invalid query parameters", body = ProblemDto),
        (status = 401, description = "Not authenticated", body = ProblemDto)
    ),
)]
pub async fn get_my_transactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<WalletTxQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;
    let Query(query) = query?;

    let page = WalletService::new(&state.db)
        .transactions(GetWalletTxsParam::from_dto(user.id, query))
        .await?;

    Ok((StatusCode::OK, Json(page.into_dto())))
}
