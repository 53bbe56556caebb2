use crate::domain::ports::MarketDataProvider;
use crate::domain::technical::{TechnicalInputs, TechnicalParams, TechnicalReport};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Builds per-coin technical reports from provider data
pub struct TechnicalAnalysisService {
    market_data: Arc<dyn MarketDataProvider>,
    params: TechnicalParams,
}

impl TechnicalAnalysisService {
    pub fn new(market_data: Arc<dyn MarketDataProvider>, params: TechnicalParams) -> Self {
        Self {
            market_data,
            params,
        }
    }

    pub async fn analyze(&self, coin_id: &str, days: u32) -> Result<TechnicalReport> {
        let (market, history) = tokio::join!(
            self.market_data.coin_market(coin_id),
            self.market_data.price_history(coin_id, days)
        );

        let coin = market
            .with_context(|| format!("Failed to fetch market data for {}", coin_id))?
            .with_context(|| format!("Unknown coin: {}", coin_id))?;
        let history = history
            .with_context(|| format!("Failed to fetch price history for {}", coin_id))?;

        let prices: Vec<f64> = history.iter().map(|p| p.price).collect();
        let inputs = TechnicalInputs {
            prices: &prices,
            volume_24h: coin.total_volume,
            market_cap: coin.market_cap,
            all_time_high: coin.all_time_high,
            all_time_low: coin.all_time_low,
        };

        let report = TechnicalReport::from_history(coin.id.as_str(), &inputs, &self.params);
        info!(
            "Technical report for {} over {} prices: volatility {:.2}, signal {:?}",
            coin_id,
            prices.len(),
            report.volatility_index,
            report.price_signal.map(|s| s.direction)
        );
        Ok(report)
    }
}
