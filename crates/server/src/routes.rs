pub mod cars;
pub mod prices;

use axum::{
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi;
use crate::routes::cars::VehiclesState;
use crate::routes::prices::PricingState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn http_trace() -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}

/// Build the vehicles application router: car resources, health, API docs.
pub fn build_vehicles_router(state: VehiclesState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/cars", get(cars::list).post(cars::create))
        .route("/cars/:id", get(cars::get).put(cars::update).delete(cars::delete))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::VehiclesApiDoc::openapi()))
        .layer(cors)
        .layer(http_trace())
}

/// Build the pricing application router: price resources, health, API docs.
pub fn build_pricing_router(state: PricingState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/prices", get(prices::list).post(prices::create))
        .route("/prices/:id", get(prices::get).put(prices::update).delete(prices::delete))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::PricingApiDoc::openapi()))
        .layer(cors)
        .layer(http_trace())
}
