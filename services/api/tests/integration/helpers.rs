#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

use reppay_api::domain::repository::{EscrowRepository, Mailer, OtpRepository, UserRepository};
use reppay_api::domain::types::{
    EscrowEntry, NewEscrowEntry, NewOtp, OneTimePasscode, OutgoingEmail, User, WalletConnection,
};
use reppay_api::error::ApiServiceError;
use reppay_api::infra::db;
use reppay_api::infra::mail::{MailTransport, MemoryMailer};
use reppay_api::router::build_router;
use reppay_api::state::AppState;
use reppay_domain::escrow::EscrowStatus;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn upsert_wallet(&self, connection: &WalletConnection) -> Result<i32, ApiServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.email == connection.email) {
            user.name = connection.name.clone();
            user.wallet_address = Some(connection.wallet_address.clone());
            user.wallet_type = Some(connection.wallet_kind.as_str().to_owned());
            return Ok(user.id);
        }
        let id = users.len() as i32 + 1;
        users.push(User {
            id,
            email: connection.email.clone(),
            name: connection.name.clone(),
            wallet_address: Some(connection.wallet_address.clone()),
            wallet_type: Some(connection.wallet_kind.as_str().to_owned()),
            created_at: Utc::now(),
        });
        Ok(id)
    }
}

pub fn test_user() -> User {
    User {
        id: 1,
        email: "alice@example.com".to_owned(),
        name: "Alice".to_owned(),
        wallet_address: None,
        wallet_type: None,
        created_at: Utc::now(),
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockOtpRepo {
    pub otps: Arc<Mutex<Vec<OneTimePasscode>>>,
}

impl MockOtpRepo {
    pub fn new(otps: Vec<OneTimePasscode>) -> Self {
        Self {
            otps: Arc::new(Mutex::new(otps)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn otps_handle(&self) -> Arc<Mutex<Vec<OneTimePasscode>>> {
        Arc::clone(&self.otps)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn create(&self, otp: &NewOtp) -> Result<i32, ApiServiceError> {
        let mut otps = self.otps.lock().unwrap();
        let id = otps.len() as i32 + 1;
        otps.push(OneTimePasscode {
            id,
            email: otp.email.clone(),
            code: otp.code.clone(),
            created_at: otp.created_at,
            expires_at: otp.expires_at,
            is_used: false,
        });
        Ok(id)
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiServiceError> {
        let mut otps = self.otps.lock().unwrap();
        let latest = otps
            .iter_mut()
            .filter(|o| o.email == email && o.code == code && o.is_valid_at(now))
            .max_by_key(|o| (o.created_at, o.id));
        match latest {
            Some(otp) => {
                otp.is_used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub fn test_otp(id: i32, code: &str, expires_in: Duration) -> OneTimePasscode {
    let now = Utc::now();
    OneTimePasscode {
        id,
        email: "alice@example.com".to_owned(),
        code: code.to_owned(),
        created_at: now,
        expires_at: now + expires_in,
        is_used: false,
    }
}

// ── MockEscrowRepo ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockEscrowRepo {
    pub entries: Arc<Mutex<Vec<EscrowEntry>>>,
}

impl MockEscrowRepo {
    pub fn new(entries: Vec<EscrowEntry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries_handle(&self) -> Arc<Mutex<Vec<EscrowEntry>>> {
        Arc::clone(&self.entries)
    }
}

impl EscrowRepository for MockEscrowRepo {
    async fn create(&self, entry: &NewEscrowEntry) -> Result<i32, ApiServiceError> {
        let mut entries = self.entries.lock().unwrap();
        let id = entries.len() as i32 + 1;
        entries.push(EscrowEntry {
            id,
            beneficiary_email: entry.beneficiary_email.clone(),
            beneficiary_name: entry.beneficiary_name.clone(),
            amount: entry.amount.to_string(),
            currency: entry.currency.clone(),
            sender_wallet_address: entry.sender_wallet_address.clone(),
            sender_wallet_type: entry.sender_wallet_kind.as_str().to_owned(),
            status: EscrowStatus::Pending,
            created_at: entry.created_at,
            claimed_at: None,
            claim_tx_id: None,
        });
        Ok(id)
    }

    async fn list_pending(
        &self,
        beneficiary_email: &str,
    ) -> Result<Vec<EscrowEntry>, ApiServiceError> {
        let mut pending: Vec<EscrowEntry> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.beneficiary_email == beneficiary_email)
            .filter(|e| e.status == EscrowStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|e| std::cmp::Reverse((e.created_at, e.id)));
        Ok(pending)
    }

    async fn claim(
        &self,
        id: i32,
        beneficiary_email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<EscrowEntry>, ApiServiceError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.iter_mut().find(|e| {
            e.id == id
                && e.beneficiary_email == beneficiary_email
                && e.status == EscrowStatus::Pending
        });
        Ok(entry.map(|e| {
            e.status = EscrowStatus::Claimed;
            e.claimed_at = Some(now);
            e.clone()
        }))
    }

    async fn record_claim_tx(
        &self,
        id: i32,
        beneficiary_email: &str,
        tx_id: &str,
    ) -> Result<bool, ApiServiceError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.iter_mut().find(|e| {
            e.id == id
                && e.beneficiary_email == beneficiary_email
                && e.status == EscrowStatus::Claimed
                && e.claim_tx_id.is_none()
        });
        Ok(entry
            .map(|e| e.claim_tx_id = Some(tx_id.to_owned()))
            .is_some())
    }
}

pub fn test_escrow_entry(id: i32, amount: &str, currency: &str) -> EscrowEntry {
    EscrowEntry {
        id,
        beneficiary_email: "bob@example.com".to_owned(),
        beneficiary_name: "Bob".to_owned(),
        amount: amount.to_owned(),
        currency: currency.to_owned(),
        sender_wallet_address: "So1anaSender111".to_owned(),
        sender_wallet_type: "phantom".to_owned(),
        status: EscrowStatus::Pending,
        created_at: Utc::now(),
        claimed_at: None,
        claim_tx_id: None,
    }
}

// ── Mailers ──────────────────────────────────────────────────────────────────

/// Mailer whose relay is always down.
pub struct FailingMailer;

impl Mailer for FailingMailer {
    async fn send(&self, _email: &OutgoingEmail) -> Result<(), ApiServiceError> {
        Err(ApiServiceError::EmailDelivery(anyhow::anyhow!(
            "relay unavailable"
        )))
    }
}

/// Pull the 6-digit code out of an OTP email body.
pub fn code_from_email(email: &OutgoingEmail) -> String {
    let (_, rest) = email
        .text
        .split_once("is: ")
        .expect("otp email should contain the code");
    rest.chars().take(6).collect()
}

// ── HTTP test app ────────────────────────────────────────────────────────────

pub struct TestApp {
    pub server: TestServer,
    pub db: DatabaseConnection,
    pub outbox: MemoryMailer,
}

pub async fn in_memory_db() -> DatabaseConnection {
    let conn = db::connect("sqlite::memory:", 1).await.unwrap();
    db::migrate(&conn, false).await.unwrap();
    conn
}

pub async fn test_app() -> TestApp {
    let outbox = MemoryMailer::new();
    test_app_with(MailTransport::Memory(outbox.clone()), outbox).await
}

pub async fn test_app_with(mailer: MailTransport, outbox: MemoryMailer) -> TestApp {
    let db = in_memory_db().await;
    let state = AppState {
        db: db.clone(),
        mailer,
    };
    let server = TestServer::new(build_router(state)).unwrap();
    TestApp { server, db, outbox }
}
