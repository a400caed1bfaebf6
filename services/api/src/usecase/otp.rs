use chrono::{Duration, Utc};
use rand::RngExt;
use tracing::info;

use crate::domain::repository::{Mailer, OtpRepository};
use crate::domain::types::{
    NewOtp, OTP_EMAIL_SUBJECT, OTP_RANGE, OTP_TTL_SECS, OutgoingEmail,
};
use crate::error::ApiServiceError;

/// Draw a 6-digit numeric passcode.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(OTP_RANGE).to_string()
}

fn otp_email(to: &str, code: &str) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_owned(),
        subject: OTP_EMAIL_SUBJECT.to_owned(),
        text: format!(
            "Your Reppay verification code is: {code}. This code will expire in {} minutes.",
            OTP_TTL_SECS / 60
        ),
    }
}

// ── SendOtp ──────────────────────────────────────────────────────────────────

pub struct SendOtpInput {
    pub email: String,
}

pub struct SendOtpUseCase<O, M>
where
    O: OtpRepository,
    M: Mailer,
{
    pub otps: O,
    pub mailer: M,
}

impl<O, M> SendOtpUseCase<O, M>
where
    O: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, input: SendOtpInput) -> Result<(), ApiServiceError> {
        let now = Utc::now();
        let otp = NewOtp {
            email: input.email,
            code: generate_code(),
            created_at: now,
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
        };

        // The row is kept even if delivery fails below; the caller sees a 500.
        let otp_id = self.otps.create(&otp).await?;
        self.mailer.send(&otp_email(&otp.email, &otp.code)).await?;

        info!(otp_id, "otp sent");
        Ok(())
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyOtpUseCase<O: OtpRepository> {
    pub otps: O,
}

impl<O: OtpRepository> VerifyOtpUseCase<O> {
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<(), ApiServiceError> {
        let consumed = self
            .otps
            .consume(&input.email, &input.code, Utc::now())
            .await?;
        if !consumed {
            return Err(ApiServiceError::InvalidOtp);
        }
        Ok(())
    }
}
