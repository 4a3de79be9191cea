//! Create `credential` table.
//!
//! Password hashes keyed by principal id (a user or provider id). No FK:
//! the principal may live in either table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Credential::Table)
                    .if_not_exists()
                    .col(uuid(Credential::PrincipalId).primary_key())
                    .col(string_len(Credential::PasswordHash, 255).not_null())
                    .col(string_len(Credential::PasswordAlgorithm, 32).not_null())
                    .col(timestamp_with_time_zone(Credential::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Credential::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Credential { Table, PrincipalId, PasswordHash, PasswordAlgorithm, UpdatedAt }
