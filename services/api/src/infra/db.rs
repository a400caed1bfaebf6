use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectOptions, Database,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, OnConflict},
};
use sea_orm_migration::MigratorTrait;
use tracing::warn;

use reppay_api_migration::Migrator;
use reppay_api_schema::{escrow_entries, otps, users};
use reppay_domain::escrow::EscrowStatus;

use crate::domain::repository::{EscrowRepository, OtpRepository, UserRepository};
use crate::domain::types::{EscrowEntry, NewEscrowEntry, NewOtp, User, WalletConnection};
use crate::error::ApiServiceError;

// ── Connection ────────────────────────────────────────────────────────────────

/// Open the SQLite pool.
pub async fn connect(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(url);
    opts.max_connections(max_connections).sqlx_logging(false);
    Database::connect(opts).await
}

/// Apply pending migrations. With `reset`, drop every table first.
pub async fn migrate(db: &DatabaseConnection, reset: bool) -> Result<(), DbErr> {
    if reset {
        warn!("DATABASE_RESET is set: dropping and recreating all tables");
        Migrator::fresh(db).await
    } else {
        Migrator::up(db, None).await
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn upsert_wallet(&self, connection: &WalletConnection) -> Result<i32, ApiServiceError> {
        let model = users::ActiveModel {
            email: Set(connection.email.clone()),
            name: Set(connection.name.clone()),
            wallet_address: Set(Some(connection.wallet_address.clone())),
            wallet_type: Set(Some(connection.wallet_kind.as_str().to_owned())),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        users::Entity::insert(model)
            .on_conflict(
                OnConflict::column(users::Column::Email)
                    .update_columns([
                        users::Column::Name,
                        users::Column::WalletAddress,
                        users::Column::WalletType,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert user wallet")?;

        let user = self
            .find_by_email(&connection.email)
            .await?
            .context("user missing after upsert")?;
        Ok(user.id)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        wallet_address: model.wallet_address,
        wallet_type: model.wallet_type,
        created_at: model.created_at,
    }
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn create(&self, otp: &NewOtp) -> Result<i32, ApiServiceError> {
        let model = otps::ActiveModel {
            email: Set(otp.email.clone()),
            code: Set(otp.code.clone()),
            created_at: Set(otp.created_at),
            expires_at: Set(otp.expires_at),
            is_used: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create otp")?;
        Ok(model.id)
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiServiceError> {
        let latest = otps::Entity::find()
            .filter(otps::Column::Email.eq(email))
            .filter(otps::Column::Code.eq(code))
            .filter(otps::Column::IsUsed.eq(false))
            .filter(otps::Column::ExpiresAt.gt(now))
            .order_by_desc(otps::Column::CreatedAt)
            .order_by_desc(otps::Column::Id)
            .one(&self.db)
            .await
            .context("find latest valid otp")?;
        let Some(latest) = latest else {
            return Ok(false);
        };

        // Guarded on is_used so two concurrent verifications cannot both win.
        let result = otps::Entity::update_many()
            .col_expr(otps::Column::IsUsed, Expr::value(true))
            .filter(otps::Column::Id.eq(latest.id))
            .filter(otps::Column::IsUsed.eq(false))
            .filter(otps::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .context("mark otp used")?;
        Ok(result.rows_affected == 1)
    }
}

// ── Escrow repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEscrowRepository {
    pub db: DatabaseConnection,
}

impl DbEscrowRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<EscrowEntry>, ApiServiceError> {
        let model = escrow_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find escrow entry by id")?;
        model.map(escrow_from_model).transpose()
    }
}

impl EscrowRepository for DbEscrowRepository {
    async fn create(&self, entry: &NewEscrowEntry) -> Result<i32, ApiServiceError> {
        let model = escrow_entries::ActiveModel {
            beneficiary_email: Set(entry.beneficiary_email.clone()),
            beneficiary_name: Set(entry.beneficiary_name.clone()),
            amount: Set(entry.amount.to_string()),
            currency: Set(entry.currency.clone()),
            sender_wallet_address: Set(entry.sender_wallet_address.clone()),
            sender_wallet_type: Set(entry.sender_wallet_kind.as_str().to_owned()),
            status: Set(EscrowStatus::Pending.as_str().to_owned()),
            created_at: Set(entry.created_at),
            claimed_at: Set(None),
            claim_tx_id: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create escrow entry")?;
        Ok(model.id)
    }

    async fn list_pending(
        &self,
        beneficiary_email: &str,
    ) -> Result<Vec<EscrowEntry>, ApiServiceError> {
        let models = escrow_entries::Entity::find()
            .filter(escrow_entries::Column::BeneficiaryEmail.eq(beneficiary_email))
            .filter(escrow_entries::Column::Status.eq(EscrowStatus::Pending.as_str()))
            .order_by_desc(escrow_entries::Column::CreatedAt)
            .order_by_desc(escrow_entries::Column::Id)
            .all(&self.db)
            .await
            .context("list pending escrow entries")?;
        models.into_iter().map(escrow_from_model).collect()
    }

    async fn claim(
        &self,
        id: i32,
        beneficiary_email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<EscrowEntry>, ApiServiceError> {
        // The status guard makes pending -> claimed happen at most once.
        let result = escrow_entries::Entity::update_many()
            .col_expr(
                escrow_entries::Column::Status,
                Expr::value(EscrowStatus::Claimed.as_str()),
            )
            .col_expr(escrow_entries::Column::ClaimedAt, Expr::value(now))
            .filter(escrow_entries::Column::Id.eq(id))
            .filter(escrow_entries::Column::BeneficiaryEmail.eq(beneficiary_email))
            .filter(escrow_entries::Column::Status.eq(EscrowStatus::Pending.as_str()))
            .exec(&self.db)
            .await
            .context("claim escrow entry")?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn record_claim_tx(
        &self,
        id: i32,
        beneficiary_email: &str,
        tx_id: &str,
    ) -> Result<bool, ApiServiceError> {
        let result = escrow_entries::Entity::update_many()
            .col_expr(escrow_entries::Column::ClaimTxId, Expr::value(tx_id))
            .filter(escrow_entries::Column::Id.eq(id))
            .filter(escrow_entries::Column::BeneficiaryEmail.eq(beneficiary_email))
            .filter(escrow_entries::Column::Status.eq(EscrowStatus::Claimed.as_str()))
            .filter(escrow_entries::Column::ClaimTxId.is_null())
            .exec(&self.db)
            .await
            .context("record claim transaction")?;
        Ok(result.rows_affected == 1)
    }
}

fn escrow_from_model(model: escrow_entries::Model) -> Result<EscrowEntry, ApiServiceError> {
    let status = model
        .status
        .parse::<EscrowStatus>()
        .with_context(|| format!("escrow entry {}", model.id))?;
    Ok(EscrowEntry {
        id: model.id,
        beneficiary_email: model.beneficiary_email,
        beneficiary_name: model.beneficiary_name,
        amount: model.amount,
        currency: model.currency,
        sender_wallet_address: model.sender_wallet_address,
        sender_wallet_type: model.sender_wallet_type,
        status,
        created_at: model.created_at,
        claimed_at: model.claimed_at,
        claim_tx_id: model.claim_tx_id,
    })
}
