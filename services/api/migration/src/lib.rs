use sea_orm_migration::prelude::*;

mod m20250405_000001_create_users;
mod m20250405_000002_create_otps;
mod m20250405_000003_create_escrow_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250405_000001_create_users::Migration),
            Box::new(m20250405_000002_create_otps::Migration),
            Box::new(m20250405_000003_create_escrow_entries::Migration),
        ]
    }
}
