use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::car::{CarService, SeaOrmCarRepository};
use service::clients::maps::HttpMapsClient;
use service::clients::prices::HttpPriceClient;
use service::db::price_service;

use crate::routes::{self, cars::VehiclesState, prices::PricingState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(service: Service) -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(mut cfg) => {
            cfg.normalize_and_validate().ok();
            let s = match service {
                Service::Vehicles => cfg.vehicles,
                Service::Pricing => cfg.pricing,
            };
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let (port_env, default_port) = match service {
                Service::Vehicles => ("VEHICLES_PORT", 8080),
                Service::Pricing => ("PRICING_PORT", 8082),
            };
            let port = env::var(port_env)
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(default_port);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

#[derive(Clone, Copy)]
enum Service {
    Vehicles,
    Pricing,
}

fn peer_endpoints() -> (String, String) {
    let mut peers = configs::load_default().map(|c| c.peers).unwrap_or_default();
    peers.normalize_from_env();
    (peers.pricing_endpoint, peers.maps_endpoint)
}

/// Public entry: build the vehicles app and run the HTTP server
pub async fn run_vehicles() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection and schema
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    models::manufacturer::seed_defaults(&db)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    // Peer clients for enrichment
    let (pricing_endpoint, maps_endpoint) = peer_endpoints();
    let repo = Arc::new(SeaOrmCarRepository { db });
    let cars = Arc::new(CarService::new(
        repo,
        Arc::new(HttpPriceClient::new(pricing_endpoint)),
        Arc::new(HttpMapsClient::new(maps_endpoint)),
    ));
    let state = VehiclesState { cars };

    // Build router
    let app: Router = routes::build_vehicles_router(state, build_cors());

    // Bind and serve
    let addr = load_bind_addr(Service::Vehicles)?;
    info!(%addr, "starting vehicles service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry: build the pricing app and run the HTTP server
pub async fn run_pricing() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    price_service::seed_prices(&db)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let state = PricingState { db };
    let app: Router = routes::build_pricing_router(state, build_cors());

    let addr = load_bind_addr(Service::Pricing)?;
    info!(%addr, "starting pricing service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
