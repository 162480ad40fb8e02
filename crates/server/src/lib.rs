pub mod errors;
pub mod hal;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use startup::{run_pricing, run_vehicles};
