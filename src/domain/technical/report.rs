use crate::domain::technical::fibonacci::{FibonacciLevels, fibonacci_levels};
use crate::domain::technical::momentum::{
    DEFAULT_FAST_PERIOD, DEFAULT_RSI_PERIOD, DEFAULT_SIGNAL_PERIOD, DEFAULT_SLOW_PERIOD,
    PriceSignal, price_signal, rsi,
};
use crate::domain::technical::stats::{CRYPTO_PERIODS_PER_YEAR, Stats};
use crate::domain::technical::volatility::{liquidity_ratio, percent_changes, volatility_index};
use serde::{Deserialize, Serialize};

/// Indicator periods used when building a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
    pub rsi_period: usize,
    pub risk_free_rate: f64, // annual
    pub periods_per_year: f64,
}

impl Default for TechnicalParams {
    fn default() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            signal_period: DEFAULT_SIGNAL_PERIOD,
            rsi_period: DEFAULT_RSI_PERIOD,
            risk_free_rate: 0.0,
            periods_per_year: CRYPTO_PERIODS_PER_YEAR,
        }
    }
}

/// Raw market data for one coin
#[derive(Debug, Clone, Copy)]
pub struct TechnicalInputs<'a> {
    /// Daily closes, oldest first
    pub prices: &'a [f64],
    pub volume_24h: f64,
    pub market_cap: f64,
    pub all_time_high: f64,
    pub all_time_low: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReport {
    pub coin_id: String,
    pub current_price: Option<f64>,
    pub volatility_index: f64,
    pub liquidity_ratio: f64,
    pub fibonacci: Option<FibonacciLevels>,
    pub price_signal: Option<PriceSignal>,
    pub rsi: Option<f64>,
    pub sharpe_ratio: f64,
}

impl TechnicalReport {
    pub fn from_history(
        coin_id: impl Into<String>,
        inputs: &TechnicalInputs<'_>,
        params: &TechnicalParams,
    ) -> Self {
        let prices = inputs.prices;
        let current_price = prices.last().copied().filter(|p| p.is_finite());

        let fibonacci = current_price.and_then(|price| {
            fibonacci_levels(inputs.all_time_high, inputs.all_time_low, price)
        });

        Self {
            coin_id: coin_id.into(),
            current_price,
            volatility_index: volatility_index(&percent_changes(prices)),
            liquidity_ratio: liquidity_ratio(inputs.volume_24h, inputs.market_cap),
            fibonacci,
            price_signal: price_signal(
                prices,
                params.fast_period,
                params.slow_period,
                params.signal_period,
            ),
            rsi: rsi(prices, params.rsi_period),
            sharpe_ratio: Stats::sharpe_ratio(
                &Stats::simple_returns(prices),
                params.risk_free_rate,
                params.periods_per_year,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_short_history() {
        let prices = [100.0, 101.0, 99.0];
        let inputs = TechnicalInputs {
            prices: &prices,
            volume_24h: 10.0,
            market_cap: 1_000.0,
            all_time_high: 150.0,
            all_time_low: 50.0,
        };

        let params = TechnicalParams::default();
        let report = TechnicalReport::from_history("bitcoin", &inputs, &params);

        assert_eq!(report.current_price, Some(99.0));
        assert!(report.volatility_index > 0.0);
        assert!((report.liquidity_ratio - 0.01).abs() < 1e-12);
        assert!(report.fibonacci.is_some());
        // Not enough history for the EMA and RSI windows
        assert!(report.price_signal.is_none());
        assert!(report.rsi.is_none());
    }

    #[test]
    fn test_report_from_empty_history() {
        let inputs = TechnicalInputs {
            prices: &[],
            volume_24h: 0.0,
            market_cap: 0.0,
            all_time_high: 0.0,
            all_time_low: 0.0,
        };

        let params = TechnicalParams::default();
        let report = TechnicalReport::from_history("ghost", &inputs, &params);

        assert_eq!(report.current_price, None);
        assert_eq!(report.volatility_index, 0.0);
        assert_eq!(report.liquidity_ratio, 0.0);
        assert!(report.fibonacci.is_none());
        assert_eq!(report.sharpe_ratio, 0.0);
    }
}
