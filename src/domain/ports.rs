use crate::domain::market::metrics::{CoinMarket, GlobalMetrics, PricePoint};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Market-wide cap and volume
    async fn global_metrics(&self) -> Result<GlobalMetrics>;

    /// Top coins by market cap, largest first
    async fn top_coins(&self, limit: usize) -> Result<Vec<CoinMarket>>;

    /// Market listing for a single coin
    async fn coin_market(&self, coin_id: &str) -> Result<Option<CoinMarket>>;

    /// Daily prices for the last `days` days, oldest first
    async fn price_history(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>>;
}
