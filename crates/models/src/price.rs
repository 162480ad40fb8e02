use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

/// A vehicle price. Keyed by the external vehicle id, so the primary key is
/// supplied by the caller rather than generated.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub currency: String,
    pub amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_currency(c: &str) -> Result<String, errors::ModelError> {
    let up = c.to_ascii_uppercase();
    if up.len() != 3 || !up.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(errors::ModelError::Validation("currency must be a 3-letter code".into()));
    }
    Ok(up)
}

pub fn validate_amount(a: Decimal) -> Result<(), errors::ModelError> {
    if a.is_sign_negative() {
        return Err(errors::ModelError::Validation("amount must be >= 0".into()));
    }
    Ok(())
}
