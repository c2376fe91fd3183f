//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into problem responses. The `AppError` enum serves as the
//! top-level error type that wraps domain-specific errors and implements `IntoResponse`
//! so handlers can return it directly with `?`.
//!
//! Every error is rendered as an `application/problem+json` body carrying a stable
//! machine-readable `code` next to the human-readable `detail`.

pub mod auth;
pub mod config;
pub mod internal;
pub mod token;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::{FieldErrorDto, ProblemDto},
    server::error::{
        auth::AuthError, config::ConfigError, internal::InternalError, token::TokenError,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain-specific errors describe their own
/// problem (status, code, detail), while infrastructure failures collapse into a
/// generic 500 response with the details logged server-side.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication, credential or account-state error.
    ///
    /// Delegates to `AuthError::problem()` for status and code mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// One-time or refresh token lookup failure.
    #[error(transparent)]
    TokenErr(#[from] TokenError),

    /// Unexpected internal failure (hashing, mail transport, JWT encoding).
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// A required input was missing or blank after normalization.
    ///
    /// # Fields
    /// - Human-readable field label, e.g. `"Current password"`
    #[error("{0} is required")]
    Required(&'static str),

    /// Request body failed declarative field validation.
    #[error("Validation failed: {0}")]
    ValidationErr(#[from] validator::ValidationErrors),

    /// Request body could not be parsed as the expected JSON document.
    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] JsonRejection),

    /// Query string could not be parsed, e.g. a timestamp that is not RFC 3339.
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] QueryRejection),
}

/// RFC 7807 style problem description rendered by every error response.
#[derive(Debug, Clone)]
pub struct Problem {
    pub status: StatusCode,
    pub title: String,
    pub code: String,
    pub detail: String,
    pub errors: Option<Vec<FieldErrorDto>>,
}

impl Problem {
    /// Creates a problem whose title is the status reason phrase.
    ///
    /// # Arguments
    /// - `status` - HTTP status of the response
    /// - `code` - Stable machine-readable error code
    /// - `detail` - Human-readable description
    ///
    /// # Returns
    /// - `Problem` - Problem without field errors
    pub fn new(status: StatusCode, code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status,
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            code: code.into(),
            detail: detail.into(),
            errors: None,
        }
    }

    /// Creates a problem whose code is derived from the status, e.g. `GONE`.
    pub fn from_status(status: StatusCode, detail: impl Into<String>) -> Self {
        Self::new(status, status_code_name(status), detail)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_errors(mut self, errors: Vec<FieldErrorDto>) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let body = ProblemDto {
            problem_type: "about:blank".to_string(),
            title: self.title,
            status: self.status.as_u16(),
            detail: self.detail,
            code: self.code,
            errors: self.errors,
        };

        (
            self.status,
            [(header::CONTENT_TYPE, "application/problem+json")],
            Json(body),
        )
            .into_response()
    }
}

/// Upper snake case name of a status, used as the code of status-only problems.
pub fn status_code_name(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
        StatusCode::FORBIDDEN => "FORBIDDEN",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::CONFLICT => "CONFLICT",
        StatusCode::GONE => "GONE",
        StatusCode::INTERNAL_SERVER_ERROR => "INTERNAL_SERVER_ERROR",
        _ => "ERROR",
    }
}

impl AppError {
    /// Builds the problem description for this error.
    ///
    /// Infrastructure errors never expose their message; they map to a generic
    /// `INTERNAL_ERROR` problem.
    ///
    /// # Returns
    /// - `Problem` - Status, code and detail to render
    pub fn problem(&self) -> Problem {
        match self {
            Self::AuthErr(err) => err.problem(),
            Self::TokenErr(err) => err.problem(),
            Self::Required(field) => Problem::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("{} is required", field),
            ),
            Self::ValidationErr(errors) => {
                Problem::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation failed")
                    .with_title("Validation failed")
                    .with_errors(field_errors(errors))
            }
            Self::InvalidQuery(err) => Problem::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                err.body_text(),
            ),
            Self::MalformedJson(_) => {
                Problem::new(StatusCode::BAD_REQUEST, "MALFORMED_JSON", "Malformed JSON")
                    .with_title("Malformed JSON")
            }
            Self::ConfigErr(_) | Self::InternalErr(_) | Self::DbErr(_) => Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Unexpected error",
            ),
        }
    }
}

/// Flattens validator errors into `{field, message}` pairs sorted by field name.
fn field_errors(errors: &validator::ValidationErrors) -> Vec<FieldErrorDto> {
    let mut result: Vec<FieldErrorDto> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| FieldErrorDto {
                field: field.to_string(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
            })
        })
        .collect();

    result.sort_by(|a, b| a.field.cmp(&b.field));
    result
}

/// Converts application errors into problem responses.
///
/// Handled errors are logged at warn level; errors that collapse into a 500 are
/// logged at error level with their full message.
///
/// # Returns
/// - 4xx - Domain, token and request validation errors with their specific code
/// - 500 Internal Server Error - Database, configuration and internal errors
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let problem = self.problem();

        if problem.status.is_server_error() {
            tracing::error!("Unhandled error: {}", self);
        } else {
            tracing::warn!(
                "Handled error: status={}, code={}, detail={}",
                problem.status.as_u16(),
                problem.code,
                self
            );
        }

        problem.into_response()
    }
}
