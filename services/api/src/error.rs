use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use reppay_core::error::error_response;

/// API service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiServiceError {
    /// A required request field is absent or blank. Carries the client-facing message.
    #[error("{0}")]
    MissingFields(&'static str),
    #[error("Invalid or expired OTP")]
    InvalidOtp,
    #[error("Unsupported wallet type")]
    UnsupportedWallet,
    #[error("Amount must be a positive decimal number")]
    InvalidAmount,
    #[error("User not found")]
    UserNotFound,
    #[error("Escrow entry not found or already claimed")]
    EscrowNotFound,
    #[error("Claimed escrow entry not found or transaction already recorded")]
    ClaimNotFound,
    #[error("Failed to send OTP")]
    EmailDelivery(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFields(_) => "MISSING_FIELDS",
            Self::InvalidOtp => "INVALID_OTP",
            Self::UnsupportedWallet => "UNSUPPORTED_WALLET",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EscrowNotFound => "ESCROW_NOT_FOUND",
            Self::ClaimNotFound => "CLAIM_NOT_FOUND",
            Self::EmailDelivery(_) => "EMAIL_DELIVERY",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingFields(_)
            | Self::InvalidOtp
            | Self::UnsupportedWallet
            | Self::InvalidAmount => StatusCode::BAD_REQUEST,
            Self::UserNotFound | Self::EscrowNotFound | Self::ClaimNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::EmailDelivery(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s carry a cause worth logging; the client sees the generic message.
        match &self {
            Self::EmailDelivery(e) => {
                tracing::error!(error = %format!("{e:#}"), kind = "EMAIL_DELIVERY", "email delivery failed");
            }
            Self::Internal(e) => {
                tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
            }
            _ => {}
        }
        error_response(status, self.kind(), &self.to_string())
    }
}
