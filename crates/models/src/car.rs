use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, manufacturer};

/// Whether a vehicle has had a previous owner. Closed set; anything else is
/// rejected at deserialization time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Condition {
    #[sea_orm(string_value = "NEW")]
    New,
    #[sea_orm(string_value = "USED")]
    Used,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "car")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub condition: Condition,
    pub manufacturer_code: i32,
    pub model: String,
    pub model_year: i32,
    pub production_year: i32,
    pub mileage: i32,
    pub external_color: String,
    pub body: String,
    pub engine: String,
    pub fuel_type: String,
    pub number_of_doors: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Manufacturer }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Manufacturer => Entity::belongs_to(manufacturer::Entity)
                .from(Column::ManufacturerCode)
                .to(manufacturer::Column::Code)
                .into(),
        }
    }
}

impl Related<manufacturer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manufacturer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_model_name(m: &str) -> Result<(), errors::ModelError> {
    if m.trim().is_empty() {
        return Err(errors::ModelError::Validation("model required".into()));
    }
    Ok(())
}

pub fn validate_year(y: i32) -> Result<(), errors::ModelError> {
    // 1886: first production automobile
    if !(1886..=2100).contains(&y) {
        return Err(errors::ModelError::Validation("year out of range".into()));
    }
    Ok(())
}

pub fn validate_mileage(m: i32) -> Result<(), errors::ModelError> {
    if m < 0 {
        return Err(errors::ModelError::Validation("mileage must be >= 0".into()));
    }
    Ok(())
}

pub fn validate_doors(n: i32) -> Result<(), errors::ModelError> {
    if !(1..=6).contains(&n) {
        return Err(errors::ModelError::Validation("number_of_doors must be in 1..=6".into()));
    }
    Ok(())
}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), errors::ModelError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(errors::ModelError::Validation("latitude must be in [-90, 90]".into()));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(errors::ModelError::Validation("longitude must be in [-180, 180]".into()));
    }
    Ok(())
}
