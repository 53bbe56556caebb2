//! Sub-score calculators (S1-S5)
//!
//! Each calculator maps raw market metrics onto a bounded 0-100 integer.
//! Zero or negative denominators and non-finite inputs score 0.

use crate::domain::market::snapshot::{CoinSnapshot, MarketSnapshot};
use serde::{Deserialize, Serialize};

/// Volume ratio (in percent of the 30d average) above which the volume score saturates
pub const VOLUME_RATIO_CAP_PCT: f64 = 200.0;

/// Clamp a raw percentage into a 0-100 score
pub(crate) fn bounded_score(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

/// S1: current total market cap as a percentage of the peak
pub fn market_cap_score(current_cap: f64, peak_cap: f64) -> u8 {
    if !peak_cap.is_finite() || peak_cap <= 0.0 {
        return 0;
    }
    bounded_score(current_cap / peak_cap * 100.0)
}

/// S2: 24h volume against the trailing 30d average.
///
/// 100% of average volume maps to 50; the ratio saturates at 200% (score 100).
pub fn volume_score(volume_24h: f64, avg_volume_30d: f64) -> u8 {
    if !avg_volume_30d.is_finite() || avg_volume_30d <= 0.0 {
        return 0;
    }
    let ratio_pct = (volume_24h / avg_volume_30d * 100.0).min(VOLUME_RATIO_CAP_PCT);
    bounded_score(ratio_pct / 2.0)
}

/// S3: Fear & Greed passthrough
pub fn fear_greed_score(index: u8) -> u8 {
    index.min(100)
}

/// S4: 100 minus the average distance from ATH across the tracked coins.
///
/// Coins without a usable ATH are left out of the average; an empty
/// average scores 0.
pub fn ath_score(coins: &[CoinSnapshot]) -> u8 {
    let distances: Vec<f64> = coins
        .iter()
        .filter_map(CoinSnapshot::distance_from_ath_pct)
        .collect();

    if distances.is_empty() {
        return 0;
    }

    let avg_distance = distances.iter().sum::<f64>() / distances.len() as f64;
    bounded_score(100.0 - avg_distance)
}

/// S5: share of coins up over 24h
pub fn market_breadth_score(advancing: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    bounded_score(advancing as f64 / total as f64 * 100.0)
}

/// The five sub-scores feeding the macro score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorScore {
    pub market_cap: u8,
    pub volume: u8,
    pub fear_greed: u8,
    pub ath: u8,
    pub breadth: u8,
}

impl IndicatorScore {
    pub const COMPONENT_NAMES: [&'static str; 5] =
        ["market_cap", "volume", "fear_greed", "ath", "breadth"];

    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Self {
        Self {
            market_cap: market_cap_score(snapshot.total_market_cap, snapshot.peak_market_cap),
            volume: volume_score(snapshot.total_volume_24h, snapshot.avg_volume_30d),
            fear_greed: fear_greed_score(snapshot.fear_greed_index),
            ath: ath_score(&snapshot.top_coins),
            breadth: market_breadth_score(snapshot.advancing_coins(), snapshot.top_coins.len()),
        }
    }

    /// Sub-scores in weight order (S1..S5)
    pub fn as_array(&self) -> [u8; 5] {
        [
            self.market_cap,
            self.volume,
            self.fear_greed,
            self.ath,
            self.breadth,
        ]
    }
}
