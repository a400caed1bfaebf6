use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::Context as _;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::OutgoingEmail;
use crate::error::ApiServiceError;

const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

// ── HTTP relay ───────────────────────────────────────────────────────────────

/// Posts each email as JSON to a transactional mail relay.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(endpoint: String, api_key: Option<String>, from: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
            .context("build mail relay client")?;
        Ok(Self {
            client,
            endpoint,
            api_key,
            from,
        })
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), ApiServiceError> {
        let message = RelayMessage {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            text: &email.text,
        };
        let mut request = self.client.post(&self.endpoint).json(&message);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context("deliver email via relay")
            .map_err(ApiServiceError::EmailDelivery)?;
        debug!(to = %email.to, "email handed to relay");
        Ok(())
    }
}

// ── In-process outbox ────────────────────────────────────────────────────────

/// Emails kept by [`MemoryMailer`]; older ones are dropped past this.
pub const OUTBOX_CAPACITY: usize = 100;

/// Development transport used when no relay is configured. Nothing leaves the
/// process: each message is logged at `warn` and the latest
/// [`OUTBOX_CAPACITY`] are kept for inspection.
#[derive(Clone)]
pub struct MemoryMailer {
    outbox: Arc<Mutex<VecDeque<OutgoingEmail>>>,
    capacity: usize,
}

impl Default for MemoryMailer {
    fn default() -> Self {
        Self::with_capacity(OUTBOX_CAPACITY)
    }
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            outbox: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Snapshot of the retained messages, oldest first.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }
}

impl Mailer for MemoryMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), ApiServiceError> {
        warn!(
            to = %email.to,
            subject = %email.subject,
            text = %email.text,
            "no mail relay configured (MAIL_API_URL unset): email NOT delivered"
        );
        let mut outbox = self.outbox.lock().unwrap_or_else(PoisonError::into_inner);
        while outbox.len() >= self.capacity {
            outbox.pop_front();
        }
        outbox.push_back(email.clone());
        Ok(())
    }
}

// ── Transport selection ──────────────────────────────────────────────────────

/// The mailer wired into [`AppState`](crate::state::AppState).
#[derive(Clone)]
pub enum MailTransport {
    Relay(HttpMailer),
    Memory(MemoryMailer),
}

impl MailTransport {
    /// Relay when `MAIL_API_URL` is set, in-memory otherwise.
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        match &config.mail_api_url {
            Some(url) => Ok(Self::Relay(HttpMailer::new(
                url.clone(),
                config.mail_api_key.clone(),
                config.mail_from.clone(),
            )?)),
            None => {
                warn!("MAIL_API_URL is unset: OTP emails are logged, not delivered");
                Ok(Self::Memory(MemoryMailer::new()))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Relay(_) => "relay",
            Self::Memory(_) => "memory",
        }
    }
}

impl Mailer for MailTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), ApiServiceError> {
        match self {
            Self::Relay(mailer) => mailer.send(email).await,
            Self::Memory(mailer) => mailer.send(email).await,
        }
    }
}
