use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Per-coin inputs for the ATH and breadth sub-scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSnapshot {
    pub id: String,
    pub symbol: String,
    pub current_price: Option<f64>,
    pub all_time_high: f64,
    pub price_change_percent_24h: f64,
}

impl CoinSnapshot {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        current_price: f64,
        all_time_high: f64,
        price_change_percent_24h: f64,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            current_price: Some(current_price),
            all_time_high,
            price_change_percent_24h,
        }
    }

    /// Percentage below the all-time high, floored at zero.
    /// `None` when the price is unknown or the ATH cannot be used as a denominator.
    pub fn distance_from_ath_pct(&self) -> Option<f64> {
        let price = self.current_price.filter(|p| p.is_finite())?;
        if !self.all_time_high.is_finite() || self.all_time_high <= 0.0 {
            return None;
        }
        let distance = (self.all_time_high - price) / self.all_time_high * 100.0;
        Some(distance.max(0.0))
    }

    pub fn is_up_24h(&self) -> bool {
        self.price_change_percent_24h > 0.0
    }
}

/// Aggregated market metrics consumed by the macro scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub total_market_cap: f64,
    pub peak_market_cap: f64,
    pub peak_market_cap_date: NaiveDate,
    pub total_volume_24h: f64,
    pub avg_volume_30d: f64,
    pub fear_greed_index: u8, // 0-100
    pub top_coins: Vec<CoinSnapshot>,
    pub captured_at: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Number of tracked coins with a positive 24h change
    pub fn advancing_coins(&self) -> usize {
        self.top_coins.iter().filter(|c| c.is_up_24h()).count()
    }
}

/// Reference peak used when the live cap has not exceeded it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketCapPeak {
    pub value: f64,
    pub date: NaiveDate,
}

impl MarketCapPeak {
    pub fn new(value: f64, date: NaiveDate) -> Self {
        Self { value, date }
    }

    /// Returns the peak to score against: the reference, or the live cap
    /// dated `today` once the market trades above the reference.
    pub fn resolve(&self, current_cap: f64, today: NaiveDate) -> Self {
        if current_cap.is_finite() && current_cap > self.value {
            Self::new(current_cap, today)
        } else {
            *self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_distance_from_ath() {
        let coin = CoinSnapshot::new("bitcoin", "btc", 90.0, 100.0, 2.0);
        assert_eq!(coin.distance_from_ath_pct(), Some(10.0));

        // Trading above a stale ATH counts as zero distance
        let above = CoinSnapshot::new("eth", "eth", 120.0, 100.0, 1.0);
        assert_eq!(above.distance_from_ath_pct(), Some(0.0));

        let no_ath = CoinSnapshot::new("new", "new", 1.0, 0.0, 1.0);
        assert_eq!(no_ath.distance_from_ath_pct(), None);

        let unquoted = CoinSnapshot {
            current_price: None,
            ..CoinSnapshot::new("dead", "dead", 0.0, 50.0, 0.0)
        };
        assert_eq!(unquoted.distance_from_ath_pct(), None);
    }

    #[test]
    fn test_peak_resolution() {
        let peak = MarketCapPeak::new(200.0, date(2025, 10, 6));

        let kept = peak.resolve(150.0, date(2026, 1, 1));
        assert_eq!(kept, peak);

        let replaced = peak.resolve(250.0, date(2026, 1, 1));
        assert_eq!(replaced.value, 250.0);
        assert_eq!(replaced.date, date(2026, 1, 1));

        assert_eq!(peak.resolve(f64::NAN, date(2026, 1, 1)), peak);
    }

    #[test]
    fn test_advancing_coins() {
        let snapshot = MarketSnapshot {
            total_market_cap: 1.0,
            peak_market_cap: 1.0,
            peak_market_cap_date: date(2025, 1, 1),
            total_volume_24h: 1.0,
            avg_volume_30d: 1.0,
            fear_greed_index: 50,
            top_coins: vec![
                CoinSnapshot::new("a", "a", 1.0, 2.0, 0.5),
                CoinSnapshot::new("b", "b", 1.0, 2.0, 0.0),
                CoinSnapshot::new("c", "c", 1.0, 2.0, -3.0),
            ],
            captured_at: Utc::now(),
        };
        assert_eq!(snapshot.advancing_coins(), 1);
    }
}
