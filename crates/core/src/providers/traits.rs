use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::company::Company;
use crate::models::price::{PriceRow, Stats};

/// The three read operations the dashboard needs from its data provider.
///
/// `DataClient` is the HTTP implementation; tests and alternative backends
/// plug in here. Implementations make exactly one round trip per call: no
/// retries, no caching.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs).
    fn name(&self) -> &str;

    /// All companies, in the provider's order.
    async fn list_companies(&self) -> Result<Vec<Company>, CoreError>;

    /// Price series for `symbol`, chronological as returned by the provider.
    async fn get_prices(&self, symbol: &str) -> Result<Vec<PriceRow>, CoreError>;

    /// Summary statistics for `symbol`.
    async fn get_stats(&self, symbol: &str) -> Result<Stats, CoreError>;
}
