//! Create `manufacturer` table.
//!
//! Lookup table of known makes; cars reference it by code.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Manufacturer::Table)
                    .if_not_exists()
                    .col(integer(Manufacturer::Code).primary_key())
                    .col(string_len(Manufacturer::Name, 128).unique_key().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Manufacturer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Manufacturer { Table, Code, Name }
