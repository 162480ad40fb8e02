//! Create `car` table.
//!
//! One row per vehicle; detail and location fields are flattened into columns
//! and reassembled into the nested resource shape by the server crate.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Car::Table)
                    .if_not_exists()
                    .col(big_integer(Car::Id).auto_increment().primary_key())
                    .col(string_len(Car::Condition, 16).not_null())
                    .col(integer(Car::ManufacturerCode).not_null())
                    .col(string_len(Car::Model, 128).not_null())
                    .col(integer(Car::ModelYear).not_null())
                    .col(integer(Car::ProductionYear).not_null())
                    .col(integer(Car::Mileage).not_null())
                    .col(string_len(Car::ExternalColor, 64).not_null())
                    .col(string_len(Car::Body, 64).not_null())
                    .col(string_len(Car::Engine, 64).not_null())
                    .col(string_len(Car::FuelType, 32).not_null())
                    .col(integer(Car::NumberOfDoors).not_null())
                    .col(double(Car::Latitude).not_null())
                    .col(double(Car::Longitude).not_null())
                    .col(timestamp_with_time_zone(Car::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Car::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_manufacturer")
                            .from(Car::Table, Car::ManufacturerCode)
                            .to(Manufacturer::Table, Manufacturer::Code)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Car::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Car {
    Table,
    Id,
    Condition,
    ManufacturerCode,
    Model,
    ModelYear,
    ProductionYear,
    Mileage,
    ExternalColor,
    Body,
    Engine,
    FuelType,
    NumberOfDoors,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Manufacturer { Table, Code }
