use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Provider: search candidates are fetched by status (+ optional category)
        manager
            .create_index(
                Index::create()
                    .name("idx_provider_status")
                    .table(Provider::Table)
                    .col(Provider::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_provider_category")
                    .table(Provider::Table)
                    .col(Provider::CategoryId)
                    .to_owned(),
            )
            .await?;

        // Favorite: listed per user
        manager
            .create_index(
                Index::create()
                    .name("idx_favorite_user")
                    .table(Favorite::Table)
                    .col(Favorite::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_provider_status").table(Provider::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_provider_category").table(Provider::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_favorite_user").table(Favorite::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Provider { Table, Status, CategoryId }

#[derive(DeriveIden)]
enum Favorite { Table, UserId }
