use std::sync::Arc;

use common::pagination::Pagination;
use tracing::{info, warn};

use crate::car::domain::{CarDraft, CarView};
use crate::car::repository::CarRepository;
use crate::clients::maps::MapsClient;
use crate::clients::prices::PriceClient;
use crate::errors::ServiceError;

/// Shown in place of a price when the pricing service cannot be reached.
const PRICE_UNAVAILABLE: &str = "(consult price)";

/// Application service encapsulating car business rules: draft validation,
/// manufacturer lookups, and enrichment via the pricing and maps peers.
pub struct CarService<R: CarRepository> {
    repo: Arc<R>,
    prices: Arc<dyn PriceClient>,
    maps: Arc<dyn MapsClient>,
}

impl<R: CarRepository> CarService<R> {
    pub fn new(repo: Arc<R>, prices: Arc<dyn PriceClient>, maps: Arc<dyn MapsClient>) -> Self {
        Self { repo, prices, maps }
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<CarView>, ServiceError> {
        let cars = self.repo.list(page).await?;
        let mut views = Vec::with_capacity(cars.len());
        for car in cars {
            views.push(self.assemble(car).await?);
        }
        Ok(views)
    }

    /// Ids are positive by construction, so non-positive lookups are not found
    /// rather than errors.
    pub async fn find_by_id(&self, id: i64) -> Result<CarView, ServiceError> {
        if id <= 0 {
            return Err(ServiceError::not_found("car"));
        }
        let car = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("car"))?;
        self.assemble(car).await
    }

    pub async fn create(&self, draft: CarDraft) -> Result<CarView, ServiceError> {
        self.check_draft(&draft).await?;
        let car = self.repo.create(draft).await?;
        info!(id = %car.id, model = %car.model, "created car");
        self.assemble(car).await
    }

    /// Full replace of the mutable fields; the id never changes.
    pub async fn update(&self, id: i64, draft: CarDraft) -> Result<CarView, ServiceError> {
        if id <= 0 {
            return Err(ServiceError::not_found("car"));
        }
        self.check_draft(&draft).await?;
        let car = self.repo.update(id, draft).await?;
        info!(id = %car.id, "updated car");
        self.assemble(car).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        if id <= 0 {
            return Ok(false);
        }
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!(id = %id, "deleted car");
        }
        Ok(deleted)
    }

    async fn check_draft(&self, draft: &CarDraft) -> Result<(), ServiceError> {
        draft.validate()?;
        // Manufacturers are a fixed lookup table; unknown codes are a client error.
        if self.repo.manufacturer(draft.manufacturer_code).await?.is_none() {
            return Err(ServiceError::Validation(format!(
                "unknown manufacturer code {}",
                draft.manufacturer_code
            )));
        }
        Ok(())
    }

    /// Join the manufacturer row and consult the peers. Peer failures degrade
    /// the view instead of failing the request.
    async fn assemble(&self, car: models::car::Model) -> Result<CarView, ServiceError> {
        let manufacturer = self
            .repo
            .manufacturer(car.manufacturer_code)
            .await?
            .ok_or_else(|| ServiceError::not_found("manufacturer"))?;

        let price = match self.prices.price_for_vehicle(car.id).await {
            Ok(p) => p,
            Err(e) => {
                warn!(id = %car.id, err = %e, "pricing service unavailable");
                PRICE_UNAVAILABLE.to_string()
            }
        };

        let address = match self.maps.address_for(car.latitude, car.longitude).await {
            Ok(a) => Some(a),
            Err(e) => {
                warn!(id = %car.id, err = %e, "maps service unavailable");
                None
            }
        };

        Ok(CarView { car, manufacturer, price, address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::maps::Address;
    use crate::clients::ClientError;
    use async_trait::async_trait;
    use chrono::Utc;
    use models::{car, manufacturer};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MemoryCarRepository {
        cars: Mutex<HashMap<i64, car::Model>>,
        next_id: Mutex<i64>,
    }

    impl MemoryCarRepository {
        fn new() -> Self {
            Self { cars: Mutex::new(HashMap::new()), next_id: Mutex::new(1) }
        }

        fn materialize(id: i64, draft: CarDraft) -> car::Model {
            let now = Utc::now().into();
            car::Model {
                id,
                condition: draft.condition,
                manufacturer_code: draft.manufacturer_code,
                model: draft.model,
                model_year: draft.model_year,
                production_year: draft.production_year,
                mileage: draft.mileage,
                external_color: draft.external_color,
                body: draft.body,
                engine: draft.engine,
                fuel_type: draft.fuel_type,
                number_of_doors: draft.number_of_doors,
                latitude: draft.latitude,
                longitude: draft.longitude,
                created_at: now,
                updated_at: now,
            }
        }
    }

    #[async_trait]
    impl CarRepository for MemoryCarRepository {
        async fn list(&self, _page: Pagination) -> Result<Vec<car::Model>, ServiceError> {
            let mut cars: Vec<_> = self.cars.lock().unwrap().values().cloned().collect();
            cars.sort_by_key(|c| c.id);
            Ok(cars)
        }

        async fn get(&self, id: i64) -> Result<Option<car::Model>, ServiceError> {
            Ok(self.cars.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self, draft: CarDraft) -> Result<car::Model, ServiceError> {
            let mut next = self.next_id.lock().unwrap();
            let id = *next;
            *next += 1;
            let model = Self::materialize(id, draft);
            self.cars.lock().unwrap().insert(id, model.clone());
            Ok(model)
        }

        async fn update(&self, id: i64, draft: CarDraft) -> Result<car::Model, ServiceError> {
            let mut cars = self.cars.lock().unwrap();
            if !cars.contains_key(&id) {
                return Err(ServiceError::not_found("car"));
            }
            let model = Self::materialize(id, draft);
            cars.insert(id, model.clone());
            Ok(model)
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.cars.lock().unwrap().remove(&id).is_some())
        }

        async fn manufacturer(&self, code: i32) -> Result<Option<manufacturer::Model>, ServiceError> {
            Ok(manufacturer::DEFAULT_MAKES
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(code, name)| manufacturer::Model { code: *code, name: name.to_string() }))
        }
    }

    struct FixedPriceClient;

    #[async_trait]
    impl PriceClient for FixedPriceClient {
        async fn price_for_vehicle(&self, _vehicle_id: i64) -> Result<String, ClientError> {
            Ok("USD 20000.00".into())
        }
    }

    struct DownPriceClient;

    #[async_trait]
    impl PriceClient for DownPriceClient {
        async fn price_for_vehicle(&self, _vehicle_id: i64) -> Result<String, ClientError> {
            Err(ClientError::Network("connection refused".into()))
        }
    }

    struct FixedMapsClient;

    #[async_trait]
    impl MapsClient for FixedMapsClient {
        async fn address_for(&self, _lat: f64, _lon: f64) -> Result<Address, ClientError> {
            Ok(Address {
                address: "777 Brockton Avenue".into(),
                city: "Abington".into(),
                state: "MA".into(),
                zip: "02351".into(),
            })
        }
    }

    struct DownMapsClient;

    #[async_trait]
    impl MapsClient for DownMapsClient {
        async fn address_for(&self, _lat: f64, _lon: f64) -> Result<Address, ClientError> {
            Err(ClientError::Status(503))
        }
    }

    fn example_draft() -> CarDraft {
        CarDraft {
            condition: car::Condition::Used,
            manufacturer_code: 101,
            model: "Impala".into(),
            model_year: 2018,
            production_year: 2018,
            mileage: 32280,
            external_color: "white".into(),
            body: "sedan".into(),
            engine: "3.6L V6".into(),
            fuel_type: "Gasoline".into(),
            number_of_doors: 4,
            latitude: 40.730610,
            longitude: -73.935242,
        }
    }

    fn service_with(
        prices: Arc<dyn PriceClient>,
        maps: Arc<dyn MapsClient>,
    ) -> CarService<MemoryCarRepository> {
        CarService::new(Arc::new(MemoryCarRepository::new()), prices, maps)
    }

    #[tokio::test]
    async fn create_assigns_id_and_enriches() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(FixedMapsClient));
        let view = svc.create(example_draft()).await.unwrap();
        assert_eq!(view.car.id, 1);
        assert_eq!(view.manufacturer.name, "Chevrolet");
        assert_eq!(view.price, "USD 20000.00");
        assert_eq!(view.address.as_ref().map(|a| a.city.as_str()), Some("Abington"));
    }

    #[tokio::test]
    async fn find_by_id_rejects_non_positive_ids() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(FixedMapsClient));
        svc.create(example_draft()).await.unwrap();
        assert!(matches!(svc.find_by_id(0).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.find_by_id(-5).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.find_by_id(99).await, Err(ServiceError::NotFound(_))));
        assert!(svc.find_by_id(1).await.is_ok());
    }

    #[tokio::test]
    async fn price_falls_back_when_pricing_is_down() {
        let svc = service_with(Arc::new(DownPriceClient), Arc::new(FixedMapsClient));
        let view = svc.create(example_draft()).await.unwrap();
        assert_eq!(view.price, "(consult price)");
    }

    #[tokio::test]
    async fn address_omitted_when_maps_is_down() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(DownMapsClient));
        let view = svc.create(example_draft()).await.unwrap();
        assert!(view.address.is_none());
        // Price enrichment is unaffected
        assert_eq!(view.price, "USD 20000.00");
    }

    #[tokio::test]
    async fn update_replaces_mutable_fields_and_keeps_id() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(FixedMapsClient));
        let created = svc.create(example_draft()).await.unwrap();

        let mut draft = example_draft();
        draft.manufacturer_code = 102;
        draft.model = "Focus".into();
        draft.condition = car::Condition::New;
        let updated = svc.update(created.car.id, draft).await.unwrap();

        assert_eq!(updated.car.id, created.car.id);
        assert_eq!(updated.manufacturer.code, 102);
        assert_eq!(updated.manufacturer.name, "Ford");
        assert_eq!(updated.car.model, "Focus");
        assert_eq!(updated.car.condition, car::Condition::New);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(FixedMapsClient));
        let res = svc.update(42, example_draft()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_unknown_manufacturer() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(FixedMapsClient));
        let mut draft = example_draft();
        draft.manufacturer_code = 999;
        let res = svc.create(draft).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(FixedMapsClient));
        let mut draft = example_draft();
        draft.number_of_doors = 0;
        assert!(matches!(svc.create(draft).await, Err(ServiceError::Model(_))));
    }

    #[tokio::test]
    async fn delete_then_find_is_not_found() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(FixedMapsClient));
        let created = svc.create(example_draft()).await.unwrap();
        assert!(svc.delete(created.car.id).await.unwrap());
        assert!(matches!(svc.find_by_id(created.car.id).await, Err(ServiceError::NotFound(_))));
        // Second delete reports missing
        assert!(!svc.delete(created.car.id).await.unwrap());
    }

    #[tokio::test]
    async fn list_returns_all_created_cars() {
        let svc = service_with(Arc::new(FixedPriceClient), Arc::new(FixedMapsClient));
        svc.create(example_draft()).await.unwrap();
        svc.create(example_draft()).await.unwrap();
        let views = svc.list(Pagination::default()).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].car.id, 1);
        assert_eq!(views[1].car.id, 2);
    }
}
