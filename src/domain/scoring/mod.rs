//! Macro Market Sentiment Scoring
//!
//! Five bounded sub-scores derived from a market snapshot:
//! - S1 market cap vs. peak
//! - S2 24h volume vs. 30d average
//! - S3 Fear & Greed index
//! - S4 distance of the top coins from their ATH
//! - S5 market breadth
//!
//! combined by the `CompositeScorer` into a single 0-100 macro score.

pub mod composite;
pub mod indicators;

pub use composite::{CompositeScorer, LabelThresholds, MacroLabel, MacroScore, ScoreWeights};
pub use indicators::{
    IndicatorScore, ath_score, fear_greed_score, market_breadth_score, market_cap_score,
    volume_score,
};
