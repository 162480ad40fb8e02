//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20230101_000001_create_manufacturer;
mod m20230101_000002_create_car;
mod m20230101_000003_create_price;
mod m20230101_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230101_000001_create_manufacturer::Migration),
            Box::new(m20230101_000002_create_car::Migration),
            Box::new(m20230101_000003_create_price::Migration),
            // Indexes should always be applied last
            Box::new(m20230101_000004_add_indexes::Migration),
        ]
    }
}
