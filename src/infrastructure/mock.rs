use crate::domain::market::metrics::{CoinMarket, GlobalMetrics, PricePoint};
use crate::domain::ports::MarketDataProvider;
use crate::domain::sentiment::{FearGreedReading, SentimentProvider};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Deterministic market data for offline runs and tests
#[derive(Clone)]
pub struct MockMarketDataProvider {
    global: Arc<RwLock<GlobalMetrics>>,
    coins: Arc<RwLock<Vec<CoinMarket>>>,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl MockMarketDataProvider {
    pub fn new(global: GlobalMetrics, coins: Vec<CoinMarket>) -> Self {
        Self {
            global: Arc::new(RwLock::new(global)),
            coins: Arc::new(RwLock::new(coins)),
            calls: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    /// Provider whose every call errors
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Number of provider calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn set_global(&self, global: GlobalMetrics) {
        *self.global.write().await = global;
    }

    fn record_call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("mock market data provider configured to fail");
        }
        Ok(())
    }
}

impl Default for MockMarketDataProvider {
    fn default() -> Self {
        let coin = |id: &str, symbol: &str, price: f64, ath: f64, atl: f64, cap: f64, change: f64| {
            CoinMarket {
                id: id.to_string(),
                symbol: symbol.to_string(),
                name: id.to_string(),
                current_price: Some(price),
                market_cap: cap,
                total_volume: cap * 0.03,
                all_time_high: ath,
                all_time_low: atl,
                price_change_percent_24h: change,
            }
        };

        Self::new(
            GlobalMetrics {
                total_market_cap: 3.5e12,
                total_volume_24h: 1.2e11,
                avg_volume_30d: Some(1.0e11),
                market_cap_change_pct_24h: Some(1.2),
            },
            vec![
                coin("bitcoin", "BTC", 105_000.0, 126_000.0, 67.81, 2.1e12, 1.8),
                coin("ethereum", "ETH", 3_900.0, 4_950.0, 0.43, 4.7e11, -0.6),
                coin("solana", "SOL", 185.0, 293.0, 0.5, 1.0e11, 3.1),
                coin("ripple", "XRP", 2.4, 3.65, 0.0028, 1.4e11, -1.2),
            ],
        )
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketDataProvider {
    async fn global_metrics(&self) -> Result<GlobalMetrics> {
        self.record_call()?;
        Ok(self.global.read().await.clone())
    }

    async fn top_coins(&self, limit: usize) -> Result<Vec<CoinMarket>> {
        self.record_call()?;
        Ok(self.coins.read().await.iter().take(limit).cloned().collect())
    }

    async fn coin_market(&self, coin_id: &str) -> Result<Option<CoinMarket>> {
        self.record_call()?;
        Ok(self.coin_market_unrecorded(coin_id).await)
    }

    /// Gentle oscillating uptrend ending at the coin's current price
    async fn price_history(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        self.record_call()?;
        let Some(price) = self
            .coin_market_unrecorded(coin_id)
            .await
            .and_then(|c| c.current_price)
        else {
            return Ok(vec![]);
        };

        let now = Utc::now();
        let days = days as i64;
        Ok((0..=days)
            .map(|i| {
                let remaining = (days - i) as f64;
                let wobble = if i % 2 == 0 { 1.01 } else { 0.99 };
                PricePoint {
                    timestamp: now - Duration::days(days - i),
                    price: price * (1.0 - remaining * 0.002) * wobble,
                }
            })
            .collect())
    }
}

impl MockMarketDataProvider {
    async fn coin_market_unrecorded(&self, coin_id: &str) -> Option<CoinMarket> {
        self.coins
            .read()
            .await
            .iter()
            .find(|c| c.id == coin_id)
            .cloned()
    }
}

/// Fixed Fear & Greed reading
pub struct MockSentimentProvider {
    value: Option<u8>,
    calls: AtomicUsize,
}

impl MockSentimentProvider {
    pub fn new(value: u8) -> Self {
        Self {
            value: Some(value),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            value: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentProvider for MockSentimentProvider {
    async fn fetch_sentiment(&self) -> Result<FearGreedReading> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.value {
            Some(value) => Ok(FearGreedReading::new(value, Utc::now(), "mock")),
            None => anyhow::bail!("mock sentiment provider configured to fail"),
        }
    }
}
