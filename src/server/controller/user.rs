use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ProblemDto, StatusDto},
        auth::TokenDto,
        user::{ChangeEmailDto, ChangePasswordDto, UserProfileDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, middleware::extract::ValidatedJson,
        service::user_profile::UserProfileService, state::AppState,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

fn profile_service(state: &AppState) -> UserProfileService<'_> {
    UserProfileService::new(&state.db, &state.config.email, state.email_sender.as_ref())
}

/// Get the authenticated user's profile.
///
/// # Access Control
/// - Requires a bearer access token of an active user
///
/// # Returns
/// - `200 OK` - Profile of the current user
/// - `401 Unauthorized` - Missing or invalid access token
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserProfileDto),
        (status = 401, description = "Not authenticated", body = ProblemDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Request an email change.
///
/// Verifies the current password and mails a confirmation link to the new address.
///
/// # Access Control
/// - Requires a bearer access token of an active user
///
/// # Returns
/// - `202 Accepted` - `SENT`
/// - `400 Bad Request` - Blank fields or same email as current
/// - `401 Unauthorized` - Not authenticated or wrong current password
/// - `409 Conflict` - Email already in use
#[utoipa::path(
    post,
    path = "/api/users/me/email-change",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body = ChangeEmailDto,
    responses(
        (status = 202, description = "Confirmation mail sent", body = StatusDto),
        (status = 400, description = "Invalid request", body = ProblemDto),
        (status = 401, description = "Not authenticated or wrong password", body = ProblemDto),
        (status = 409, description = "Email already in use", body = ProblemDto)
    ),
)]
pub async fn request_email_change(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ChangeEmailDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    profile_service(&state)
        .request_email_change(&user, &payload.new_email, &payload.current_password)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(StatusDto::sent())))
}

/// Request a password change.
///
/// Verifies the current password and mails a confirmation link to the current address.
///
/// # Access Control
/// - Requires a bearer access token of an active user
///
/// # Returns
/// - `202 Accepted` - `SENT`
/// - `400 Bad Request` - Blank fields or same password as current
/// - `401 Unauthorized` - Not authenticated or wrong current password
#[utoipa::path(
    post,
    path = "/api/users/me/password-change",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    request_body = ChangePasswordDto,
    responses(
        (status = 202, description = "Confirmation mail sent", body = StatusDto),
        (status = 400, description = "Invalid request", body = ProblemDto),
        (status = 401, description = "Not authenticated or wrong password", body = ProblemDto)
    ),
)]
pub async fn request_password_change(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.jwt, &headers)
        .require()
        .await?;

    profile_service(&state)
        .request_password_change(&user, &payload.current_password, &payload.new_password)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(StatusDto::sent())))
}

/// Confirm an email change with the token from the confirmation mail.
///
/// # Returns
/// - `204 No Content` - Email changed, or token already used
/// - `400 Bad Request` - Blank or unknown token
/// - `409 Conflict` - Address taken by another account meanwhile
/// - `410 Gone` - Token expired
#[utoipa::path(
    post,
    path = "/api/users/email-change/confirm",
    tag = USER_TAG,
    request_body = TokenDto,
    responses(
        (status = 204, description = "Email changed"),
        (status = 400, description = "Missing or invalid token", body = ProblemDto),
        (status = 409, description = "Email already in use", body = ProblemDto),
        (status = 410, description = "Token expired", body = ProblemDto)
    ),
)]
pub async fn confirm_email_change(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenDto>,
) -> Result<impl IntoResponse, AppError> {
    profile_service(&state)
        .confirm_email_change(&payload.token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Confirm a password change with the token from the confirmation mail.
///
/// # Returns
/// - `204 No Content` - Password changed, or token already used
/// - `400 Bad Request` - Blank or unknown token
/// - `410 Gone` - Token expired
#[utoipa::path(
    post,
    path = "/api/users/password-change/confirm",
    tag = USER_TAG,
    request_body = TokenDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Missing or invalid token", body = ProblemDto),
        (status = 410, description = "Token expired", body = ProblemDto)
    ),
)]
pub async fn confirm_password_change(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenDto>,
) -> Result<impl IntoResponse, AppError> {
    profile_service(&state)
        .confirm_password_change(&payload.token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
