use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use reppay_core::error::AppError;

use crate::error::ApiServiceError;
use crate::handlers::required;
use crate::state::AppState;
use crate::usecase::otp::{SendOtpInput, SendOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};

#[derive(Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

// ── POST /api/send-otp ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendOtpRequest {
    pub email: Option<String>,
}

pub async fn send_otp(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<SendOtpRequest>, AppError>,
) -> Result<Json<MessageResponse>, ApiServiceError> {
    let email = required(body.email, "Email is required")?;

    let usecase = SendOtpUseCase {
        otps: state.otp_repo(),
        mailer: state.mailer(),
    };
    usecase.execute(SendOtpInput { email }).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "OTP sent successfully",
    }))
}

// ── POST /api/verify-otp ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<VerifyOtpRequest>, AppError>,
) -> Result<Json<MessageResponse>, ApiServiceError> {
    const MESSAGE: &str = "Email and OTP are required";
    let email = required(body.email, MESSAGE)?;
    let code = required(body.otp, MESSAGE)?;

    let usecase = VerifyOtpUseCase {
        otps: state.otp_repo(),
    };
    usecase.execute(VerifyOtpInput { email, code }).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "OTP verified successfully",
    }))
}
