use chrono::Utc;
use tracing::info;

use reppay_domain::amount::Amount;
use reppay_domain::escrow::token_decimals;
use reppay_domain::wallet::{Chain, WalletKind};

use crate::domain::repository::EscrowRepository;
use crate::domain::types::{EscrowEntry, NewEscrowEntry};
use crate::error::ApiServiceError;

// ── CreateEscrow ─────────────────────────────────────────────────────────────

pub struct CreateEscrowInput {
    pub beneficiary_email: String,
    pub beneficiary_name: String,
    pub amount: Amount,
    pub currency: String,
    pub sender_wallet_address: String,
    pub sender_wallet_kind: WalletKind,
}

pub struct CreateEscrowUseCase<E: EscrowRepository> {
    pub escrow: E,
}

impl<E: EscrowRepository> CreateEscrowUseCase<E> {
    /// Returns the new entry id. No beneficiary existence check, no duplicate suppression.
    pub async fn execute(&self, input: CreateEscrowInput) -> Result<i32, ApiServiceError> {
        let entry = NewEscrowEntry {
            beneficiary_email: input.beneficiary_email,
            beneficiary_name: input.beneficiary_name,
            amount: input.amount,
            currency: input.currency,
            sender_wallet_address: input.sender_wallet_address,
            sender_wallet_kind: input.sender_wallet_kind,
            created_at: Utc::now(),
        };
        let escrow_id = self.escrow.create(&entry).await?;
        info!(escrow_id, amount = %entry.amount, currency = %entry.currency, "escrow created");
        Ok(escrow_id)
    }
}

// ── ListPendingEscrow ────────────────────────────────────────────────────────

pub struct ListPendingEscrowUseCase<E: EscrowRepository> {
    pub escrow: E,
}

impl<E: EscrowRepository> ListPendingEscrowUseCase<E> {
    pub async fn execute(&self, beneficiary_email: &str) -> Result<Vec<EscrowEntry>, ApiServiceError> {
        self.escrow.list_pending(beneficiary_email).await
    }
}

// ── ClaimEscrow ──────────────────────────────────────────────────────────────

pub struct ClaimEscrowInput {
    pub id: i32,
    pub beneficiary_email: String,
}

/// What the claimant needs to run the on-chain transfer.
#[derive(Debug, Clone)]
pub struct ClaimedEscrow {
    pub id: i32,
    pub amount: String,
    pub currency: String,
    /// Amount in the token's smallest unit, when the currency is a known token.
    pub amount_base_units: Option<u64>,
    /// Chain the sponsor paid from; the claim transfer runs there too.
    pub chain: Option<Chain>,
    /// Token contract/mint on `chain` for the currency, when known.
    pub token_address: Option<&'static str>,
}

pub struct ClaimEscrowUseCase<E: EscrowRepository> {
    pub escrow: E,
}

impl<E: EscrowRepository> ClaimEscrowUseCase<E> {
    pub async fn execute(&self, input: ClaimEscrowInput) -> Result<ClaimedEscrow, ApiServiceError> {
        let entry = self
            .escrow
            .claim(input.id, &input.beneficiary_email, Utc::now())
            .await?
            .ok_or(ApiServiceError::EscrowNotFound)?;

        let amount_base_units = token_decimals(&entry.currency).and_then(|decimals| {
            entry
                .amount
                .parse::<Amount>()
                .ok()
                .and_then(|amount| amount.to_base_units(decimals))
        });

        let chain = entry
            .sender_wallet_type
            .parse::<WalletKind>()
            .ok()
            .map(WalletKind::chain);
        let token_address = chain.and_then(|chain| chain.token_address(&entry.currency));

        info!(escrow_id = entry.id, "escrow claimed");
        Ok(ClaimedEscrow {
            id: entry.id,
            amount: entry.amount,
            currency: entry.currency,
            amount_base_units,
            chain,
            token_address,
        })
    }
}

// ── RecordClaimTransaction ───────────────────────────────────────────────────

pub struct RecordClaimTransactionInput {
    pub id: i32,
    pub beneficiary_email: String,
    pub transaction_id: String,
}

pub struct RecordClaimTransactionUseCase<E: EscrowRepository> {
    pub escrow: E,
}

impl<E: EscrowRepository> RecordClaimTransactionUseCase<E> {
    pub async fn execute(&self, input: RecordClaimTransactionInput) -> Result<(), ApiServiceError> {
        let recorded = self
            .escrow
            .record_claim_tx(input.id, &input.beneficiary_email, &input.transaction_id)
            .await?;
        if !recorded {
            return Err(ApiServiceError::ClaimNotFound);
        }
        info!(escrow_id = input.id, "claim transaction recorded");
        Ok(())
    }
}
