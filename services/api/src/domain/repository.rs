#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{
    EscrowEntry, NewEscrowEntry, NewOtp, OutgoingEmail, User, WalletConnection,
};
use crate::error::ApiServiceError;

/// Repository for registered users.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError>;

    /// Insert the user or update name/wallet in place when the email exists.
    /// Returns the user id.
    async fn upsert_wallet(&self, connection: &WalletConnection) -> Result<i32, ApiServiceError>;
}

/// Repository for one-time passcodes.
pub trait OtpRepository: Send + Sync {
    /// Insert a new passcode. Earlier unused codes for the same email stay valid.
    async fn create(&self, otp: &NewOtp) -> Result<i32, ApiServiceError>;

    /// Mark the newest unused, unexpired code matching `email` + `code` as used.
    /// Returns `true` only for the caller whose update flipped the row.
    async fn consume(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiServiceError>;
}

/// Repository for the escrow ledger.
pub trait EscrowRepository: Send + Sync {
    async fn create(&self, entry: &NewEscrowEntry) -> Result<i32, ApiServiceError>;

    /// Pending entries for a beneficiary, newest first.
    async fn list_pending(
        &self,
        beneficiary_email: &str,
    ) -> Result<Vec<EscrowEntry>, ApiServiceError>;

    /// Move a pending entry owned by `beneficiary_email` to claimed.
    /// Returns the claimed entry, or `None` when absent, not owned, or already claimed.
    async fn claim(
        &self,
        id: i32,
        beneficiary_email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<EscrowEntry>, ApiServiceError>;

    /// Attach the settlement transaction id to a claimed entry that has none yet.
    /// Returns `true` if recorded.
    async fn record_claim_tx(
        &self,
        id: i32,
        beneficiary_email: &str,
        tx_id: &str,
    ) -> Result<bool, ApiServiceError>;
}

/// Port for outgoing email.
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), ApiServiceError>;
}
