use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::Json;
use chrono::{DateTime, FixedOffset};
use common::pagination::Pagination;
use serde::{Deserialize, Serialize};
use tracing::info;

use models::car::Condition;
use service::car::{CarDraft, CarService, CarView, SeaOrmCarRepository};

use crate::errors::JsonApiError;
use crate::hal::{self, Links};

#[derive(Clone)]
pub struct VehiclesState {
    pub cars: Arc<CarService<SeaOrmCarRepository>>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination { page: self.page.unwrap_or(d.page), per_page: self.per_page.unwrap_or(d.per_page) }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManufacturerDto {
    pub code: i32,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsDto {
    pub manufacturer: ManufacturerDto,
    pub model: String,
    pub model_year: i32,
    pub production_year: i32,
    pub mileage: i32,
    pub external_color: String,
    pub body: String,
    pub engine: String,
    pub fuel_type: String,
    pub number_of_doors: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationDto {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Payload accepted on POST and PUT. The manufacturer is referenced by code;
/// a submitted name is ignored in favor of the lookup table.
#[derive(Debug, Serialize, Deserialize)]
pub struct CarInput {
    pub condition: Condition,
    pub details: DetailsDto,
    pub location: LocationDto,
}

impl CarInput {
    fn into_draft(self) -> CarDraft {
        CarDraft {
            condition: self.condition,
            manufacturer_code: self.details.manufacturer.code,
            model: self.details.model,
            model_year: self.details.model_year,
            production_year: self.details.production_year,
            mileage: self.details.mileage,
            external_color: self.details.external_color,
            body: self.details.body,
            engine: self.details.engine,
            fuel_type: self.details.fuel_type,
            number_of_doors: self.details.number_of_doors,
            latitude: self.location.lat,
            longitude: self.location.lon,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResource {
    pub id: i64,
    pub condition: Condition,
    pub details: DetailsDto,
    pub location: LocationDto,
    pub price: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl CarResource {
    fn from_view(view: CarView) -> Self {
        let CarView { car, manufacturer, price, address } = view;
        let (address, city, state, zip) = match address {
            Some(a) => (Some(a.address), Some(a.city), Some(a.state), Some(a.zip)),
            None => (None, None, None, None),
        };
        Self {
            id: car.id,
            condition: car.condition,
            details: DetailsDto {
                manufacturer: ManufacturerDto { code: manufacturer.code, name: Some(manufacturer.name) },
                model: car.model,
                model_year: car.model_year,
                production_year: car.production_year,
                mileage: car.mileage,
                external_color: car.external_color,
                body: car.body,
                engine: car.engine,
                fuel_type: car.fuel_type,
                number_of_doors: car.number_of_doors,
            },
            location: LocationDto { lat: car.latitude, lon: car.longitude, address, city, state, zip },
            price,
            created_at: car.created_at,
            updated_at: car.updated_at,
            links: hal::self_links(format!("/cars/{}", car.id)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarEmbedded {
    pub car_list: Vec<CarResource>,
}

#[derive(Debug, Serialize)]
pub struct CarCollection {
    #[serde(rename = "_embedded")]
    pub embedded: CarEmbedded,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[utoipa::path(
    get, path = "/cars", tag = "cars",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<VehiclesState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<CarCollection>, JsonApiError> {
    match state.cars.list(q.pagination()).await {
        Ok(views) => {
            info!(count = views.len(), "list cars");
            let car_list = views.into_iter().map(CarResource::from_view).collect();
            Ok(Json(CarCollection {
                embedded: CarEmbedded { car_list },
                links: hal::self_links("/cars".into()),
            }))
        }
        Err(e) => Err(JsonApiError::from_service(e, "List Failed")),
    }
}

#[utoipa::path(
    get, path = "/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<VehiclesState>,
    Path(id): Path<i64>,
) -> Result<Json<CarResource>, JsonApiError> {
    match state.cars.find_by_id(id).await {
        Ok(view) => Ok(Json(CarResource::from_view(view))),
        Err(e) => Err(JsonApiError::from_service(e, "Not Found")),
    }
}

#[utoipa::path(
    post, path = "/cars", tag = "cars",
    request_body = crate::openapi::CarInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<VehiclesState>,
    Json(input): Json<CarInput>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<CarResource>), JsonApiError> {
    match state.cars.create(input.into_draft()).await {
        Ok(view) => {
            let resource = CarResource::from_view(view);
            let location = format!("/cars/{}", resource.id);
            info!(id = %resource.id, "created car");
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(resource)))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    request_body = crate::openapi::CarInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<VehiclesState>,
    Path(id): Path<i64>,
    Json(input): Json<CarInput>,
) -> Result<Json<CarResource>, JsonApiError> {
    match state.cars.update(id, input.into_draft()).await {
        Ok(view) => {
            info!(id = %id, "updated car");
            Ok(Json(CarResource::from_view(view)))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/cars/{id}", tag = "cars",
    params(("id" = i64, Path, description = "Car ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<VehiclesState>, Path(id): Path<i64>) -> StatusCode {
    match state.cars.delete(id).await {
        Ok(true) => {
            info!(id = %id, "deleted car");
            StatusCode::NO_CONTENT
        }
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            tracing::error!(err = %e, "delete car failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
