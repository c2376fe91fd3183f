use crate::server::error::AppError;

/// Fails with `"<field> is required"` when the value is empty or whitespace.
pub fn require_non_blank<'a>(value: &'a str, field: &'static str) -> Result<&'a str, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Required(field));
    }
    Ok(value)
}

/// Trims and lower-cases an email address.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    Ok(require_non_blank(email, "Email")?.trim().to_lowercase())
}

/// Trims a username, keeping its case.
pub fn normalize_username(username: &str) -> Result<String, AppError> {
    Ok(require_non_blank(username, "Username")?.trim().to_string())
}
