//! Composite Macro Score
//!
//! Combines the five sub-scores with a fixed weight vector and attaches a
//! qualitative label. Weights are held in basis points so that the default
//! vector sums to exactly 1.0 and integer inputs produce exact results.

use crate::domain::errors::ScoringError;
use crate::domain::scoring::indicators::{IndicatorScore, bounded_score};
use serde::{Deserialize, Serialize};
use std::fmt;

const BASIS_POINTS_TOTAL: u32 = 10_000;

/// Weight vector for S1..S5, in basis points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    basis_points: [u16; 5],
}

impl Default for ScoreWeights {
    /// 0.25 market cap, 0.20 volume, 0.20 fear & greed, 0.25 ATH, 0.10 breadth
    fn default() -> Self {
        Self {
            basis_points: [2500, 2000, 2000, 2500, 1000],
        }
    }
}

impl ScoreWeights {
    /// Build weights from fractions such as `[0.25, 0.2, 0.2, 0.25, 0.1]`.
    pub fn from_fractions(weights: &[f64]) -> Result<Self, ScoringError> {
        let invalid = |reason: &str| ScoringError::InvalidWeights {
            weights: weights.to_vec(),
            reason: reason.to_string(),
        };

        if weights.len() != 5 {
            return Err(invalid("expected exactly five weights"));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("weights must be finite and non-negative"));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(invalid("weights must sum to 1.0"));
        }

        let mut basis_points = [0u16; 5];
        for (slot, w) in basis_points.iter_mut().zip(weights) {
            *slot = (w * BASIS_POINTS_TOTAL as f64).round() as u16;
        }
        if basis_points.iter().map(|bp| *bp as u32).sum::<u32>() != BASIS_POINTS_TOTAL {
            return Err(invalid("weights must be expressible in basis points"));
        }

        Ok(Self { basis_points })
    }

    pub fn basis_points(&self) -> [u16; 5] {
        self.basis_points
    }

    pub fn total_basis_points(&self) -> u32 {
        self.basis_points.iter().map(|bp| *bp as u32).sum()
    }

    pub fn as_fractions(&self) -> [f64; 5] {
        self.basis_points.map(|bp| bp as f64 / BASIS_POINTS_TOTAL as f64)
    }
}

/// Label cut-offs: below `bearish_below` is bearish, above `bullish_above` bullish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelThresholds {
    pub bearish_below: u8,
    pub bullish_above: u8,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            bearish_below: 40,
            bullish_above: 60,
        }
    }
}

impl LabelThresholds {
    pub fn new(bearish_below: u8, bullish_above: u8) -> Result<Self, ScoringError> {
        if bearish_below > bullish_above {
            return Err(ScoringError::InvalidThresholds {
                bearish: bearish_below,
                bullish: bullish_above,
            });
        }
        Ok(Self {
            bearish_below,
            bullish_above,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacroLabel {
    Bearish,
    Neutral,
    Bullish,
}

impl fmt::Display for MacroLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Bullish => write!(f, "Bullish"),
        }
    }
}

impl MacroLabel {
    pub fn from_score(value: u8, thresholds: &LabelThresholds) -> Self {
        if value < thresholds.bearish_below {
            Self::Bearish
        } else if value > thresholds.bullish_above {
            Self::Bullish
        } else {
            Self::Neutral
        }
    }
}

/// Final macro reading with the breakdown it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroScore {
    pub value: u8, // 0-100
    pub label: MacroLabel,
    pub components: IndicatorScore,
}

/// Weighted combination of sub-scores
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeScorer {
    weights: ScoreWeights,
    thresholds: LabelThresholds,
}

impl CompositeScorer {
    pub fn new(weights: ScoreWeights, thresholds: LabelThresholds) -> Self {
        Self {
            weights,
            thresholds,
        }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &LabelThresholds {
        &self.thresholds
    }

    /// Score bounded sub-scores. Integer arithmetic, rounding half up.
    pub fn score(&self, components: &IndicatorScore) -> MacroScore {
        let weighted: u32 = components
            .as_array()
            .iter()
            .zip(self.weights.basis_points())
            .map(|(score, bp)| (*score).min(100) as u32 * bp as u32)
            .sum();

        let value = ((weighted + BASIS_POINTS_TOTAL / 2) / BASIS_POINTS_TOTAL).min(100) as u8;

        MacroScore {
            value,
            label: MacroLabel::from_score(value, &self.thresholds),
            components: *components,
        }
    }

    /// Unrounded weighted sum of raw components.
    ///
    /// A non-finite component yields `ScoringError::Unavailable` instead of a
    /// corrupted total.
    pub fn weighted_sum(&self, components: &[f64; 5]) -> Result<f64, ScoringError> {
        for (value, component) in components.iter().zip(IndicatorScore::COMPONENT_NAMES) {
            if !value.is_finite() {
                return Err(ScoringError::Unavailable {
                    component,
                    value: *value,
                });
            }
        }

        Ok(components
            .iter()
            .zip(self.weights.as_fractions())
            .map(|(value, weight)| value * weight)
            .sum())
    }

    /// Rounded, bounded macro value from raw components
    pub fn score_components(&self, components: &[f64; 5]) -> Result<u8, ScoringError> {
        self.weighted_sum(components).map(bounded_score)
    }
}
