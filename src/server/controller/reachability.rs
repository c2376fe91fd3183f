//! Minimal endpoints for checking reachability and bearer authentication.

use axum::{extract::State, http::HeaderMap};

use crate::server::{error::AppError, middleware::auth::AuthGuard, state::AppState};

pub static REACHABILITY_TAG: &str = "test";

/// Public check; always answers `ok`.
#[utoipa::path(
    get,
    path = "/test/public",
    tag = REACHABILITY_TAG,
    responses((status = 200, description = "Service reachable", body = String)),
)]
pub async fn public() -> &'static str {
    "ok"
}

/// Authenticated check; answers `ok` for a valid bearer token.
#[utoipa::path(
    get,
    path = "/test/secure",
    tag = REACHABILITY_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token accepted", body = String),
        (status = 401, description = "Not authenticated", body = crate::model::api::ProblemDto)
    ),
)]
pub async fn secure(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<&'static str, AppError> {
    AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    Ok("ok")
}
