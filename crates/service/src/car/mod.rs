pub mod domain;
pub mod repository;
pub mod service;

pub use domain::{CarDraft, CarView};
pub use repository::{CarRepository, SeaOrmCarRepository};
pub use service::CarService;
