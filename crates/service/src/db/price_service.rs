use chrono::Utc;
use common::pagination::Pagination;
use rand::Rng;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

use crate::errors::ServiceError;
use models::price;

/// Vehicle ids that get a price at first boot.
pub const SEEDED_VEHICLE_IDS: std::ops::RangeInclusive<i64> = 1..=10;

/// Create a price for a vehicle id. The id is external, so a duplicate is a
/// client error rather than a database fault.
pub async fn create_price(
    db: &DatabaseConnection,
    id: i64,
    currency: &str,
    amount: Decimal,
) -> Result<price::Model, ServiceError> {
    if id <= 0 {
        return Err(ServiceError::Validation("vehicle id must be positive".into()));
    }
    let currency = price::validate_currency(currency)?;
    price::validate_amount(amount)?;

    let existing = price::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if existing.is_some() {
        return Err(ServiceError::Validation(format!("price for vehicle {} already exists", id)));
    }

    let am = price::ActiveModel {
        id: Set(id),
        currency: Set(currency),
        amount: Set(amount),
        created_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Get price by vehicle id. Non-positive ids are never present.
pub async fn get_price(db: &DatabaseConnection, id: i64) -> Result<Option<price::Model>, ServiceError> {
    if id <= 0 {
        return Ok(None);
    }
    Ok(price::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// List prices ordered by vehicle id with pagination.
pub async fn list_prices(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<price::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    let rows = price::Entity::find()
        .order_by_asc(price::Column::Id)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

pub async fn count_prices(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    price::Entity::find()
        .count(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Update price fields; the id is immutable.
pub async fn update_price(
    db: &DatabaseConnection,
    id: i64,
    currency: Option<&str>,
    amount: Option<Decimal>,
) -> Result<price::Model, ServiceError> {
    let mut am: price::ActiveModel = price::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("price"))?
        .into();
    if let Some(c) = currency {
        am.currency = Set(price::validate_currency(c)?);
    }
    if let Some(a) = amount {
        price::validate_amount(a)?;
        am.amount = Set(a);
    }
    Ok(am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?)
}

/// Delete price; returns whether a row existed.
pub async fn delete_price(db: &DatabaseConnection, id: i64) -> Result<bool, ServiceError> {
    if id <= 0 {
        return Ok(false);
    }
    let res = price::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

/// Random asking price between 5000 and 25000, two fraction digits.
fn random_amount() -> Decimal {
    let cents = rand::thread_rng().gen_range(500_000..2_500_000);
    Decimal::new(cents, 2)
}

/// Seed a USD price for each of the startup vehicle ids, keeping any rows
/// that already exist so restarts do not reshuffle prices.
pub async fn seed_prices(db: &DatabaseConnection) -> Result<(), ServiceError> {
    let mut inserted = 0u32;
    for id in SEEDED_VEHICLE_IDS {
        let existing = price::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        if existing.is_none() {
            create_price(db, id, "USD", random_amount()).await?;
            inserted += 1;
        }
    }
    if inserted > 0 {
        info!(inserted, "seeded prices");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[test]
    fn random_amount_is_in_range_and_scaled() {
        for _ in 0..100 {
            let a = random_amount();
            assert!(a >= Decimal::new(500_000, 2));
            assert!(a < Decimal::new(2_500_000, 2));
            assert_eq!(a.scale(), 2);
        }
    }

    #[tokio::test]
    async fn price_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        let id = 910_001_i64;
        let _ = delete_price(&db, id).await;

        let created = create_price(&db, id, "usd", Decimal::new(1234500, 2)).await?;
        assert_eq!(created.currency, "USD");

        // Duplicate id is a validation error
        let dup = create_price(&db, id, "USD", Decimal::new(1, 2)).await;
        assert!(matches!(dup, Err(ServiceError::Validation(_))));

        let found = get_price(&db, id).await?.unwrap();
        assert_eq!(found.amount, Decimal::new(1234500, 2));

        let updated = update_price(&db, id, Some("EUR"), Some(Decimal::new(999999, 2))).await?;
        assert_eq!(updated.currency, "EUR");
        assert_eq!(updated.amount, Decimal::new(999999, 2));

        assert!(delete_price(&db, id).await?);
        assert!(get_price(&db, id).await?.is_none());
        assert!(!delete_price(&db, id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn seeding_is_idempotent_and_covers_ten_vehicles() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;

        seed_prices(&db).await?;
        let first: Vec<_> = list_prices(&db, Pagination::default())
            .await?
            .into_iter()
            .filter(|p| SEEDED_VEHICLE_IDS.contains(&p.id))
            .collect();
        assert_eq!(first.len(), 10);

        // Re-seeding must not replace existing amounts
        seed_prices(&db).await?;
        let second = get_price(&db, first[0].id).await?.unwrap();
        assert_eq!(second.amount, first[0].amount);
        Ok(())
    }
}
