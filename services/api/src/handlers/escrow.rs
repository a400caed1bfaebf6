use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reppay_core::error::AppError;
use reppay_core::serde::{to_rfc3339_ms, to_rfc3339_ms_opt};
use reppay_domain::amount::Amount;
use reppay_domain::wallet::{Chain, WalletKind};

use crate::domain::types::EscrowEntry;
use crate::error::ApiServiceError;
use crate::handlers::otp::MessageResponse;
use crate::handlers::required;
use crate::state::AppState;
use crate::usecase::escrow::{
    ClaimEscrowInput, ClaimEscrowUseCase, CreateEscrowInput, CreateEscrowUseCase,
    ListPendingEscrowUseCase, RecordClaimTransactionInput, RecordClaimTransactionUseCase,
};

/// Ids are integers; anything else cannot name an entry.
fn parse_escrow_id(raw: &str) -> Result<i32, ApiServiceError> {
    raw.parse().map_err(|_| ApiServiceError::EscrowNotFound)
}

fn parse_claim_id(raw: &str) -> Result<i32, ApiServiceError> {
    raw.parse().map_err(|_| ApiServiceError::ClaimNotFound)
}

// ── POST /api/escrow/create ──────────────────────────────────────────────────

/// Sponsors send the amount as a string (`"10.5"`) or a bare JSON number (`10.5`).
/// Either form goes through the same decimal validation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Text(String),
    Number(serde_json::Number),
}

impl From<AmountField> for String {
    fn from(field: AmountField) -> Self {
        match field {
            AmountField::Text(text) => text,
            AmountField::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEscrowRequest {
    pub beneficiary_email: Option<String>,
    pub beneficiary_name: Option<String>,
    pub amount: Option<AmountField>,
    pub currency: Option<String>,
    pub sender_wallet_address: Option<String>,
    pub sender_wallet_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEscrowResponse {
    pub success: bool,
    pub message: &'static str,
    pub escrow_id: i32,
}

pub async fn create_escrow(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<CreateEscrowRequest>, AppError>,
) -> Result<Json<CreateEscrowResponse>, ApiServiceError> {
    const MESSAGE: &str = "Beneficiary email, beneficiary name, amount, currency, sender wallet address, and sender wallet type are required";
    let beneficiary_email = required(body.beneficiary_email, MESSAGE)?;
    let beneficiary_name = required(body.beneficiary_name, MESSAGE)?;
    let amount = required(body.amount.map(String::from), MESSAGE)?;
    let currency = required(body.currency, MESSAGE)?;
    let sender_wallet_address = required(body.sender_wallet_address, MESSAGE)?;
    let sender_wallet_type = required(body.sender_wallet_type, MESSAGE)?;

    let amount: Amount = amount
        .parse()
        .map_err(|_| ApiServiceError::InvalidAmount)?;
    let sender_wallet_kind: WalletKind = sender_wallet_type
        .parse()
        .map_err(|_| ApiServiceError::UnsupportedWallet)?;

    let usecase = CreateEscrowUseCase {
        escrow: state.escrow_repo(),
    };
    let escrow_id = usecase
        .execute(CreateEscrowInput {
            beneficiary_email,
            beneficiary_name,
            amount,
            currency,
            sender_wallet_address,
            sender_wallet_kind,
        })
        .await?;

    Ok(Json(CreateEscrowResponse {
        success: true,
        message: "Escrow created successfully",
        escrow_id,
    }))
}

// ── GET /api/escrow/balance/{email} ──────────────────────────────────────────

#[derive(Serialize)]
pub struct EscrowEntryBody {
    pub id: i32,
    pub beneficiary_email: String,
    pub beneficiary_name: String,
    pub amount: String,
    pub currency: String,
    pub sender_wallet_address: String,
    pub sender_wallet_type: String,
    pub status: &'static str,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub claimed_at: Option<DateTime<Utc>>,
    pub claim_tx_id: Option<String>,
}

impl From<EscrowEntry> for EscrowEntryBody {
    fn from(entry: EscrowEntry) -> Self {
        Self {
            id: entry.id,
            beneficiary_email: entry.beneficiary_email,
            beneficiary_name: entry.beneficiary_name,
            amount: entry.amount,
            currency: entry.currency,
            sender_wallet_address: entry.sender_wallet_address,
            sender_wallet_type: entry.sender_wallet_type,
            status: entry.status.as_str(),
            created_at: entry.created_at,
            claimed_at: entry.claimed_at,
            claim_tx_id: entry.claim_tx_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowBalanceResponse {
    pub success: bool,
    pub escrow_entries: Vec<EscrowEntryBody>,
}

pub async fn escrow_balance(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<EscrowBalanceResponse>, ApiServiceError> {
    let usecase = ListPendingEscrowUseCase {
        escrow: state.escrow_repo(),
    };
    let entries = usecase.execute(&email).await?;
    Ok(Json(EscrowBalanceResponse {
        success: true,
        escrow_entries: entries.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /api/escrow/claim/{id} ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimEscrowRequest {
    pub beneficiary_email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimEscrowResponse {
    pub success: bool,
    pub message: &'static str,
    pub amount: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_base_units: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Chain>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<&'static str>,
}

pub async fn claim_escrow(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<ClaimEscrowRequest>, AppError>,
) -> Result<Json<ClaimEscrowResponse>, ApiServiceError> {
    let beneficiary_email = required(body.beneficiary_email, "Beneficiary email is required")?;
    let id = parse_escrow_id(&id)?;

    let usecase = ClaimEscrowUseCase {
        escrow: state.escrow_repo(),
    };
    let claimed = usecase
        .execute(ClaimEscrowInput {
            id,
            beneficiary_email,
        })
        .await?;

    Ok(Json(ClaimEscrowResponse {
        success: true,
        message: "Escrow claimed successfully",
        amount: claimed.amount,
        currency: claimed.currency,
        amount_base_units: claimed.amount_base_units,
        chain: claimed.chain,
        token_address: claimed.token_address,
    }))
}

// ── POST /api/escrow/claim/{id}/transaction ──────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordClaimTransactionRequest {
    pub beneficiary_email: Option<String>,
    pub transaction_id: Option<String>,
}

pub async fn record_claim_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<RecordClaimTransactionRequest>, AppError>,
) -> Result<Json<MessageResponse>, ApiServiceError> {
    const MESSAGE: &str = "Beneficiary email and transaction id are required";
    let beneficiary_email = required(body.beneficiary_email, MESSAGE)?;
    let transaction_id = required(body.transaction_id, MESSAGE)?;
    let id = parse_claim_id(&id)?;

    let usecase = RecordClaimTransactionUseCase {
        escrow: state.escrow_repo(),
    };
    usecase
        .execute(RecordClaimTransactionInput {
            id,
            beneficiary_email,
            transaction_id,
        })
        .await?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Claim transaction recorded",
    }))
}
