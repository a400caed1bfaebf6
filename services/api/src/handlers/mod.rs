pub mod escrow;
pub mod health;
pub mod otp;
pub mod user;

use crate::error::ApiServiceError;

/// Treat absent and blank fields alike: both fail with `message`.
pub(crate) fn required(
    field: Option<String>,
    message: &'static str,
) -> Result<String, ApiServiceError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiServiceError::MissingFields(message)),
    }
}
