use crate::domain::market::snapshot::CoinSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market-wide aggregates from a data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetrics {
    pub total_market_cap: f64,
    pub total_volume_24h: f64,
    /// Trailing 30-day average daily volume, when the provider exposes history
    pub avg_volume_30d: Option<f64>,
    pub market_cap_change_pct_24h: Option<f64>,
}

/// One row of a market listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// `None` when the provider has no current quote
    pub current_price: Option<f64>,
    pub market_cap: f64,
    pub total_volume: f64,
    pub all_time_high: f64,
    pub all_time_low: f64,
    pub price_change_percent_24h: f64,
}

impl From<&CoinMarket> for CoinSnapshot {
    fn from(coin: &CoinMarket) -> Self {
        CoinSnapshot {
            id: coin.id.clone(),
            symbol: coin.symbol.clone(),
            current_price: coin.current_price,
            all_time_high: coin.all_time_high,
            price_change_percent_24h: coin.price_change_percent_24h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}
