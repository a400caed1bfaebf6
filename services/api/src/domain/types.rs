use chrono::{DateTime, Utc};

use reppay_domain::amount::Amount;
use reppay_domain::escrow::EscrowStatus;
use reppay_domain::wallet::WalletKind;

/// Registered user. `wallet_*` stay `None` until a wallet is connected.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub wallet_address: Option<String>,
    pub wallet_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Wallet connect request, the input of the user upsert.
#[derive(Debug, Clone)]
pub struct WalletConnection {
    pub email: String,
    pub name: String,
    pub wallet_address: String,
    pub wallet_kind: WalletKind,
}

/// One-time passcode as stored.
#[derive(Debug, Clone)]
pub struct OneTimePasscode {
    pub id: i32,
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
}

impl OneTimePasscode {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && self.expires_at > now
    }
}

/// A passcode about to be inserted.
#[derive(Debug, Clone)]
pub struct NewOtp {
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Escrow ledger row.
#[derive(Debug, Clone)]
pub struct EscrowEntry {
    pub id: i32,
    pub beneficiary_email: String,
    pub beneficiary_name: String,
    pub amount: String,
    pub currency: String,
    pub sender_wallet_address: String,
    pub sender_wallet_type: String,
    pub status: EscrowStatus,
    pub created_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub claim_tx_id: Option<String>,
}

/// An escrow entry about to be inserted; always starts `pending`.
#[derive(Debug, Clone)]
pub struct NewEscrowEntry {
    pub beneficiary_email: String,
    pub beneficiary_name: String,
    pub amount: Amount,
    pub currency: String,
    pub sender_wallet_address: String,
    pub sender_wallet_kind: WalletKind,
    pub created_at: DateTime<Utc>,
}

/// Plain-text email handed to a [`Mailer`](crate::domain::repository::Mailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Passcode time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 600;

/// Passcodes are drawn uniformly from this range (always 6 digits).
pub const OTP_RANGE: std::ops::Range<u32> = 100_000..1_000_000;

pub const OTP_EMAIL_SUBJECT: &str = "Your Reppay Verification Code";
