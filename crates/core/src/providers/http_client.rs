use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::{debug, warn};

use super::traits::MarketDataProvider;
use crate::errors::{CoreError, Resource};
use crate::models::company::Company;
use crate::models::price::{PriceRow, Stats};
use crate::models::settings::Settings;

/// HTTP client for the dashboard's data provider.
///
/// - `GET /companies` → `[{symbol, name}]`
/// - `GET /prices?symbol=<sym>` → `[{Date, Open, High, Low, Close}]`
/// - `GET /stats?symbol=<sym>` → `{latest_close, high_52wk, low_52wk, avg_volume}`
///
/// All endpoints are unauthenticated, idempotent reads. The symbol is
/// percent-encoded into the query string.
pub struct DataClient {
    client: Client,
    base_url: String,
}

impl DataClient {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn symbol_url(&self, path: &str, symbol: &str) -> String {
        format!("{}/{path}?symbol={}", self.base_url, urlencoding::encode(symbol))
    }

    /// One request/response round trip: non-success status is a `Network`
    /// error, a body that doesn't match `T` is a `Decode` error.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        resource: Resource,
        url: &str,
    ) -> Result<T, CoreError> {
        debug!(%resource, url, "requesting");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::network(resource, e))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%resource, %status, "provider returned non-success status");
            return Err(CoreError::Network {
                resource,
                message: format!("HTTP {status}"),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| CoreError::network(resource, e))?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(%resource, error = %e, "response body did not match the expected shape");
            CoreError::Decode {
                resource,
                message: e.to_string(),
            }
        })
    }
}

impl Default for DataClient {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for DataClient {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn list_companies(&self) -> Result<Vec<Company>, CoreError> {
        let url = format!("{}/companies", self.base_url);
        self.fetch_json(Resource::Companies, &url).await
    }

    async fn get_prices(&self, symbol: &str) -> Result<Vec<PriceRow>, CoreError> {
        let url = self.symbol_url("prices", symbol);
        self.fetch_json(Resource::Prices, &url).await
    }

    async fn get_stats(&self, symbol: &str) -> Result<Stats, CoreError> {
        let url = self.symbol_url("stats", symbol);
        self.fetch_json(Resource::Stats, &url).await
    }
}
