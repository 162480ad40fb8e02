use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::Json;
use chrono::{DateTime, FixedOffset};
use common::pagination::Pagination;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::info;

use service::db::price_service;

use crate::errors::JsonApiError;
use crate::hal::{self, Links};

#[derive(Clone)]
pub struct PricingState {
    pub db: DatabaseConnection,
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

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatePriceInput {
    pub id: i64,
    pub currency: String,
    pub amount: Decimal,
}

/// PUT is a full replace of the mutable fields; the id stays as addressed.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdatePriceInput {
    pub currency: String,
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResource {
    pub id: i64,
    pub currency: String,
    pub amount: Decimal,
    pub created_at: DateTime<FixedOffset>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl PriceResource {
    fn from_model(m: models::price::Model) -> Self {
        Self {
            id: m.id,
            currency: m.currency,
            amount: m.amount,
            created_at: m.created_at,
            links: hal::self_links(format!("/prices/{}", m.id)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceEmbedded {
    pub prices: Vec<PriceResource>,
}

#[derive(Debug, Serialize)]
pub struct PriceCollection {
    #[serde(rename = "_embedded")]
    pub embedded: PriceEmbedded,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[utoipa::path(
    get, path = "/prices", tag = "prices",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<PricingState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<PriceCollection>, JsonApiError> {
    match price_service::list_prices(&state.db, q.pagination()).await {
        Ok(rows) => {
            info!(count = rows.len(), "list prices");
            let prices = rows.into_iter().map(PriceResource::from_model).collect();
            Ok(Json(PriceCollection {
                embedded: PriceEmbedded { prices },
                links: hal::self_links("/prices".into()),
            }))
        }
        Err(e) => Err(JsonApiError::from_service(e, "List Failed")),
    }
}

#[utoipa::path(
    get, path = "/prices/{id}", tag = "prices",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<PricingState>,
    Path(id): Path<i64>,
) -> Result<Json<PriceResource>, JsonApiError> {
    match price_service::get_price(&state.db, id).await {
        Ok(Some(m)) => Ok(Json(PriceResource::from_model(m))),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e, "Get Failed")),
    }
}

#[utoipa::path(
    post, path = "/prices", tag = "prices",
    request_body = crate::openapi::CreatePriceInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(
    State(state): State<PricingState>,
    Json(input): Json<CreatePriceInput>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<PriceResource>), JsonApiError> {
    match price_service::create_price(&state.db, input.id, &input.currency, input.amount).await {
        Ok(m) => {
            let location = format!("/prices/{}", m.id);
            info!(id = %m.id, "created price");
            Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(PriceResource::from_model(m))))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Create Failed")),
    }
}

#[utoipa::path(
    put, path = "/prices/{id}", tag = "prices",
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = crate::openapi::UpdatePriceInputDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(
    State(state): State<PricingState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdatePriceInput>,
) -> Result<Json<PriceResource>, JsonApiError> {
    match price_service::update_price(&state.db, id, Some(&input.currency), Some(input.amount)).await {
        Ok(m) => {
            info!(id = %m.id, "updated price");
            Ok(Json(PriceResource::from_model(m)))
        }
        Err(e) => Err(JsonApiError::from_service(e, "Update Failed")),
    }
}

#[utoipa::path(
    delete, path = "/prices/{id}", tag = "prices",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<PricingState>, Path(id): Path<i64>) -> StatusCode {
    match price_service::delete_price(&state.db, id).await {
        Ok(true) => {
            info!(id = %id, "deleted price");
            StatusCode::NO_CONTENT
        }
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            tracing::error!(err = %e, "delete price failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
