pub mod car;
pub mod db;
pub mod errors;
pub mod manufacturer;
pub mod price;
