use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ProblemDto, StatusDto},
        auth::{AuthDto, LoginDto, RegisterDto, ResendVerificationDto, TokenDto},
    },
    server::{
        error::AppError,
        middleware::{
            cookie::{cleared_refresh_cookie, read_cookie, refresh_cookie},
            extract::ValidatedJson,
        },
        model::auth::{AuthTokens, RegisterParam, RegistrationOutcome},
        service::auth::AuthService,
        state::AppState,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(
        &state.db,
        &state.config,
        &state.jwt,
        state.email_sender.as_ref(),
    )
}

/// Builds the login response: access token in the body, refresh token in a cookie.
fn token_response(state: &AppState, tokens: AuthTokens) -> Result<impl IntoResponse, AppError> {
    let cookie = refresh_cookie(
        &state.config.refresh_cookie,
        &tokens.refresh_token,
        state.config.jwt.refresh_token_ttl.num_seconds(),
    )?;

    Ok((
        StatusCode::OK,
        [cookie],
        Json(AuthDto::bearer(tokens.access_token)),
    ))
}

/// Register a new account.
///
/// When email verification is enabled the account is created inactive and a
/// verification link is mailed to the given address.
///
/// # Arguments
/// - `state` - Application state containing the database connection and mail sender
/// - `payload` - Username, email and password
///
/// # Returns
/// - `201 Created` - `REGISTERED`, the account can log in
/// - `202 Accepted` - `EMAIL_VERIFICATION_REQUIRED`, a link was mailed
/// - `400 Bad Request` - Blank or invalid fields
/// - `409 Conflict` - Email or username already in use
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created and active", body = StatusDto),
        (status = 202, description = "Account created, verification mail sent", body = StatusDto),
        (status = 400, description = "Invalid registration data", body = ProblemDto),
        (status = 409, description = "Email or username already in use", body = ProblemDto),
        (status = 500, description = "Internal server error", body = ProblemDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = auth_service(&state)
        .register(RegisterParam::from_dto(payload))
        .await?;

    let status = match outcome {
        RegistrationOutcome::Registered => StatusCode::CREATED,
        RegistrationOutcome::VerificationRequired => StatusCode::ACCEPTED,
    };

    Ok((status, Json(outcome.into_dto())))
}

/// Log in with email and password.
///
/// # Returns
/// - `200 OK` - Access token in the body, refresh token in an HttpOnly cookie
/// - `401 Unauthorized` - Invalid credentials
/// - `409 Conflict` - Email not verified yet
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AuthDto,
            headers(("set-cookie" = String, description = "Refresh token cookie"))),
        (status = 400, description = "Missing email or password", body = ProblemDto),
        (status = 401, description = "Invalid credentials", body = ProblemDto),
        (status = 409, description = "Email not verified", body = ProblemDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = auth_service(&state)
        .login(&payload.email, &payload.password)
        .await?;

    token_response(&state, tokens)
}

/// Exchange the refresh token cookie for a new token pair.
///
/// The presented refresh token is revoked and replaced.
///
/// # Returns
/// - `200 OK` - New access token and rotated refresh cookie
/// - `401 Unauthorized` - Missing, unknown, revoked or expired refresh token, or inactive user
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Tokens refreshed", body = AuthDto,
            headers(("set-cookie" = String, description = "Rotated refresh token cookie"))),
        (status = 401, description = "Refresh token rejected", body = ProblemDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let raw = read_cookie(&headers, &state.config.refresh_cookie.name);

    let tokens = auth_service(&state).refresh(raw.as_deref()).await?;

    token_response(&state, tokens)
}

/// Log out by revoking the refresh token cookie.
///
/// Always succeeds and clears the cookie, even without a valid token.
///
/// # Returns
/// - `204 No Content` - Token revoked (if any) and cookie cleared
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out",
            headers(("set-cookie" = String, description = "Expired refresh token cookie")))
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let raw = read_cookie(&headers, &state.config.refresh_cookie.name);

    auth_service(&state).logout(raw.as_deref()).await?;

    let cookie = cleared_refresh_cookie(&state.config.refresh_cookie)?;
    Ok((StatusCode::NO_CONTENT, [cookie]))
}

/// Verify an email address with the token from the verification mail.
///
/// Activates the account and logs the user in.
///
/// # Returns
/// - `200 OK` - Access token in the body, refresh token in an HttpOnly cookie
/// - `400 Bad Request` - Blank or unknown token
/// - `410 Gone` - Token expired
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    tag = AUTH_TAG,
    request_body = TokenDto,
    responses(
        (status = 200, description = "Email verified and logged in", body = AuthDto),
        (status = 400, description = "Missing or invalid token", body = ProblemDto),
        (status = 410, description = "Token expired", body = ProblemDto)
    ),
)]
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = auth_service(&state).verify_email(&payload.token).await?;

    token_response(&state, tokens)
}

/// Resend the verification mail.
///
/// Responds identically whether or not the address belongs to an unverified account.
///
/// # Returns
/// - `202 Accepted` - `SENT`
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = AUTH_TAG,
    request_body = ResendVerificationDto,
    responses(
        (status = 202, description = "Request accepted", body = StatusDto),
        (status = 400, description = "Invalid email", body = ProblemDto)
    ),
)]
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResendVerificationDto>,
) -> Result<impl IntoResponse, AppError> {
    auth_service(&state)
        .resend_verification(&payload.email)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(StatusDto::sent())))
}
