use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EscrowEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EscrowEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EscrowEntries::BeneficiaryEmail)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EscrowEntries::BeneficiaryName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EscrowEntries::Amount).string().not_null())
                    .col(ColumnDef::new(EscrowEntries::Currency).string().not_null())
                    .col(
                        ColumnDef::new(EscrowEntries::SenderWalletAddress)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EscrowEntries::SenderWalletType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EscrowEntries::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(EscrowEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EscrowEntries::ClaimedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(EscrowEntries::ClaimTxId).string())
                    .to_owned(),
            )
            .await?;

        // Balance listing filters on beneficiary + status.
        manager
            .create_index(
                Index::create()
                    .table(EscrowEntries::Table)
                    .col(EscrowEntries::BeneficiaryEmail)
                    .col(EscrowEntries::Status)
                    .name("idx_escrow_entries_beneficiary_status")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EscrowEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EscrowEntries {
    Table,
    Id,
    BeneficiaryEmail,
    BeneficiaryName,
    Amount,
    Currency,
    SenderWalletAddress,
    SenderWalletType,
    Status,
    CreatedAt,
    ClaimedAt,
    ClaimTxId,
}
