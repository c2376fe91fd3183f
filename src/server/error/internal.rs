use thiserror::Error;

/// Internal failures that are never the client's fault.
///
/// All variants result in a 500 Internal Server Error with a generic message
/// returned to the client.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Argon2 hashing failed or the blocking task running it was cancelled.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// Failure to sign an access token.
    #[error("Failed to encode JWT: {0}")]
    JwtEncode(#[from] jsonwebtoken::errors::Error),

    /// Mail transport rejected or failed to deliver a message.
    #[error("Unable to send email to {to}: {reason}")]
    EmailDelivery {
        /// Recipient address
        to: String,
        /// Transport error description
        reason: String,
    },

    /// A configured cookie name or path produced an unrepresentable header.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),

    /// Socket bind or server I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
