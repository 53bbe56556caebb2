//! Scoring configuration parsing from environment variables.
//!
//! Weight vector, label thresholds and the reference market cap peak.

use super::parse_env;
use crate::domain::market::snapshot::MarketCapPeak;
use crate::domain::scoring::{LabelThresholds, ScoreWeights};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::env;

/// Reference total market cap peak (USD) and the day it was set
pub const DEFAULT_PEAK_MARKET_CAP_USD: f64 = 4.38e12;
pub const DEFAULT_PEAK_MARKET_CAP_DATE: &str = "2025-10-06";

#[derive(Debug, Clone)]
pub struct ScoringEnvConfig {
    pub weights: ScoreWeights,
    pub thresholds: LabelThresholds,
    pub reference_peak: MarketCapPeak,
}

impl ScoringEnvConfig {
    pub fn from_env() -> Result<Self> {
        let weights = match env::var("SCORE_WEIGHTS") {
            Ok(raw) => Self::parse_weights(&raw)?,
            Err(_) => ScoreWeights::default(),
        };

        let defaults = LabelThresholds::default();
        let thresholds = LabelThresholds::new(
            parse_env("BEARISH_THRESHOLD", defaults.bearish_below)?,
            parse_env("BULLISH_THRESHOLD", defaults.bullish_above)?,
        )?;

        let peak_value = parse_env("PEAK_MARKET_CAP_USD", DEFAULT_PEAK_MARKET_CAP_USD)?;
        if !peak_value.is_finite() || peak_value <= 0.0 {
            anyhow::bail!("Invalid PEAK_MARKET_CAP_USD: {}. Must be positive", peak_value);
        }
        let peak_date_str = env::var("PEAK_MARKET_CAP_DATE")
            .unwrap_or_else(|_| DEFAULT_PEAK_MARKET_CAP_DATE.to_string());
        let peak_date = NaiveDate::parse_from_str(&peak_date_str, "%Y-%m-%d")
            .context("Failed to parse PEAK_MARKET_CAP_DATE (expected YYYY-MM-DD)")?;

        Ok(Self {
            weights,
            thresholds,
            reference_peak: MarketCapPeak::new(peak_value, peak_date),
        })
    }

    /// Parse `"0.25,0.2,0.2,0.25,0.1"` into validated weights
    pub fn parse_weights(raw: &str) -> Result<ScoreWeights> {
        let fractions = raw
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to parse SCORE_WEIGHTS")?;

        Ok(ScoreWeights::from_fractions(&fractions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weights() {
        let weights = ScoringEnvConfig::parse_weights("0.25, 0.2, 0.2, 0.25, 0.1").unwrap();
        assert_eq!(weights, ScoreWeights::default());

        assert!(ScoringEnvConfig::parse_weights("0.5,abc").is_err());
        assert!(ScoringEnvConfig::parse_weights("0.5,0.5").is_err());
    }
}
