use models::{car, manufacturer};

use crate::clients::maps::Address;
use crate::errors::ServiceError;

/// The mutable fields of a car, as accepted on create and update.
/// The id is never part of the draft; it is assigned on insert and immutable
/// afterwards.
#[derive(Clone, Debug)]
pub struct CarDraft {
    pub condition: car::Condition,
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
}

impl CarDraft {
    pub fn validate(&self) -> Result<(), ServiceError> {
        car::validate_model_name(&self.model)?;
        car::validate_year(self.model_year)?;
        car::validate_year(self.production_year)?;
        car::validate_mileage(self.mileage)?;
        car::validate_doors(self.number_of_doors)?;
        car::validate_coordinates(self.latitude, self.longitude)?;
        Ok(())
    }
}

/// A car joined with its manufacturer and enriched with data from the peer
/// services. This is what the controllers render.
#[derive(Clone, Debug)]
pub struct CarView {
    pub car: car::Model,
    pub manufacturer: manufacturer::Model,
    pub price: String,
    pub address: Option<Address>,
}
