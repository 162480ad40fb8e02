use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::ClientError;

/// Looks up the asking price for a vehicle from the pricing service.
#[async_trait]
pub trait PriceClient: Send + Sync {
    /// Returns a display string such as `"USD 20000.00"`.
    async fn price_for_vehicle(&self, vehicle_id: i64) -> Result<String, ClientError>;
}

#[derive(Debug, Deserialize)]
struct PriceBody {
    currency: String,
    amount: Decimal,
}

/// reqwest-backed client against `GET {base}/prices/{id}`.
pub struct HttpPriceClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpPriceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), http: reqwest::Client::new() }
    }
}

#[async_trait]
impl PriceClient for HttpPriceClient {
    async fn price_for_vehicle(&self, vehicle_id: i64) -> Result<String, ClientError> {
        let url = format!("{}/prices/{}", self.base_url.trim_end_matches('/'), vehicle_id);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status().as_u16()));
        }
        let body = resp
            .json::<PriceBody>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;
        Ok(format!("{} {}", body.currency, body.amount.round_dp(2)))
    }
}
