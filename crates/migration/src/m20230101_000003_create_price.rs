//! Create `price` table.
//!
//! Keyed by the external vehicle id, so the primary key is not generated.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Price::Table)
                    .if_not_exists()
                    .col(big_integer(Price::Id).primary_key())
                    .col(string_len(Price::Currency, 3).not_null())
                    .col(decimal_len(Price::Amount, 12, 2).not_null())
                    .col(timestamp_with_time_zone(Price::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Price::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Price { Table, Id, Currency, Amount, CreatedAt }
