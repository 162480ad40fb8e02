use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ClientError;

/// Street address resolved from a coordinate pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Reverse-geocodes coordinates through the maps service.
#[async_trait]
pub trait MapsClient: Send + Sync {
    async fn address_for(&self, lat: f64, lon: f64) -> Result<Address, ClientError>;
}

/// reqwest-backed client against `GET {base}/maps?lat=..&lon=..`.
pub struct HttpMapsClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpMapsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: reqwest::Client::new() }
    }
}

#[async_trait]
impl MapsClient for HttpMapsClient {
    async fn address_for(&self, lat: f64, lon: f64) -> Result<Address, ClientError> {
        let url = format!("{}/maps", self.base_url.trim_end_matches('/'));
        let resp = self
            .http
            .get(&url)
            .query(&[("lat", lat), ("lon", lon)])
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }
        resp.json::<Address>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}
