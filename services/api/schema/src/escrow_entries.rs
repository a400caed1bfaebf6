use sea_orm::entity::prelude::*;

/// Amount parked for a beneficiary until they claim it.
/// `beneficiary_email` is not a foreign key: the beneficiary may not be registered yet.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "escrow_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub beneficiary_email: String,
    pub beneficiary_name: String,
    /// Decimal string as entered by the sponsor.
    pub amount: String,
    pub currency: String,
    pub sender_wallet_address: String,
    pub sender_wallet_type: String,
    /// `pending` or `claimed`.
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub claimed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// On-chain transaction id reported by the claimant after settlement.
    pub claim_tx_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
