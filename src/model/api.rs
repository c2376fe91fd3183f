use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Problem details body returned by every error response.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct ProblemDto {
    /// Always `about:blank`
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    /// Stable machine-readable error code, e.g. `EMAIL_ALREADY_IN_USE`
    pub code: String,
    /// Per-field messages, present only for request validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldErrorDto>>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

/// Outcome marker for asynchronous flows such as registration or mail dispatch.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct StatusDto {
    /// One of `REGISTERED`, `EMAIL_VERIFICATION_REQUIRED` or `SENT`
    pub status: String,
}

impl StatusDto {
    pub fn registered() -> Self {
        Self {
            status: "REGISTERED".to_string(),
        }
    }

    pub fn email_verification_required() -> Self {
        Self {
            status: "EMAIL_VERIFICATION_REQUIRED".to_string(),
        }
    }

    pub fn sent() -> Self {
        Self {
            status: "SENT".to_string(),
        }
    }
}
