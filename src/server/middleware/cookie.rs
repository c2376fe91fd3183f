//! Refresh token cookie handling.
//!
//! The refresh token never appears in a response body; it travels in an HttpOnly
//! cookie scoped to the auth endpoints.

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderName, HeaderValue,
};
use cookie::{time::Duration, Cookie};

use crate::server::{
    config::RefreshCookieConfig,
    error::{internal::InternalError, AppError},
};

/// Builds the `Set-Cookie` header that stores a refresh token.
///
/// # Arguments
/// - `config` - Cookie name, path, SameSite and Secure settings
/// - `value` - Raw refresh token
/// - `max_age_secs` - Cookie lifetime, equal to the token lifetime
pub fn refresh_cookie(
    config: &RefreshCookieConfig,
    value: &str,
    max_age_secs: i64,
) -> Result<(HeaderName, HeaderValue), AppError> {
    let cookie = Cookie::build((config.name.clone(), value.to_string()))
        .path(config.path.clone())
        .max_age(Duration::seconds(max_age_secs))
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site.into())
        .build();

    let header = HeaderValue::from_str(&cookie.to_string()).map_err(InternalError::from)?;
    Ok((SET_COOKIE, header))
}

/// Builds the `Set-Cookie` header that removes the refresh token cookie.
pub fn cleared_refresh_cookie(
    config: &RefreshCookieConfig,
) -> Result<(HeaderName, HeaderValue), AppError> {
    refresh_cookie(config, "", 0)
}

/// Reads a cookie value from the request's `Cookie` headers.
///
/// Unparsable pairs are skipped; the first cookie with a matching name wins and
/// surrounding double quotes are removed from its value.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value_trimmed().to_string())
}
