//! Create `provider` table with FK to `category`.
//!
//! The searchable catalog: profile text, skills tags, rating aggregate,
//! nullable lat/lng pair, and the admin-controlled `status`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Provider::Table)
                    .if_not_exists()
                    .col(uuid(Provider::Id).primary_key())
                    .col(string_len(Provider::OwnerName, 128).not_null())
                    .col(string_len(Provider::ServiceName, 255).not_null())
                    .col(text(Provider::Description).not_null())
                    .col(string_len(Provider::Email, 255).unique_key().not_null())
                    .col(string_len(Provider::Phone, 32).not_null())
                    .col(string_len(Provider::Address, 512).not_null())
                    // Explicitly nullable: a provider without a complete pair is
                    // excluded from radius-bounded search, never an error.
                    .col(ColumnDef::new(Provider::Lat).double().null())
                    .col(ColumnDef::new(Provider::Lng).double().null())
                    .col(uuid(Provider::CategoryId).not_null())
                    .col(ColumnDef::new(Provider::Pricing).string_len(255).null())
                    .col(double(Provider::RatingAvg).not_null().default(0.0))
                    .col(integer(Provider::RatingCount).not_null().default(0))
                    .col(ColumnDef::new(Provider::Skills).array(ColumnType::Text).not_null())
                    .col(ColumnDef::new(Provider::Experience).string_len(255).null())
                    .col(string_len(Provider::Status, 32).not_null().default("pending"))
                    .col(timestamp_with_time_zone(Provider::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Provider::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_category")
                            .from(Provider::Table, Provider::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Provider::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Provider {
    Table, Id, OwnerName, ServiceName, Description, Email, Phone, Address,
    Lat, Lng, CategoryId, Pricing, RatingAvg, RatingCount, Skills, Experience,
    Status, CreatedAt, UpdatedAt,
}

#[derive(DeriveIden)]
enum Category { Table, Id }
