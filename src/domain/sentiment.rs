use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fear & Greed reading bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FearGreedClassification {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl fmt::Display for FearGreedClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtremeFear => write!(f, "Extreme Fear"),
            Self::Fear => write!(f, "Fear"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Greed => write!(f, "Greed"),
            Self::ExtremeGreed => write!(f, "Extreme Greed"),
        }
    }
}

impl FearGreedClassification {
    pub fn from_index(index: u8) -> Self {
        match index {
            0..=24 => Self::ExtremeFear,
            25..=44 => Self::Fear,
            45..=55 => Self::Neutral,
            56..=75 => Self::Greed,
            _ => Self::ExtremeGreed,
        }
    }
}

/// Fear & Greed index reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearGreedReading {
    pub value: u8, // 0-100
    pub classification: FearGreedClassification,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}

impl FearGreedReading {
    /// Values above 100 are clamped; classification is always re-derived
    pub fn new(value: u8, timestamp: DateTime<Utc>, source: impl Into<String>) -> Self {
        let value = value.min(100);
        Self {
            value,
            classification: FearGreedClassification::from_index(value),
            timestamp,
            source: source.into(),
        }
    }
}

#[async_trait]
pub trait SentimentProvider: Send + Sync {
    /// Fetch the latest Fear & Greed reading
    async fn fetch_sentiment(&self) -> anyhow::Result<FearGreedReading>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_bands() {
        use FearGreedClassification::*;

        assert_eq!(FearGreedClassification::from_index(10), ExtremeFear);
        assert_eq!(FearGreedClassification::from_index(25), Fear);
        assert_eq!(FearGreedClassification::from_index(50), Neutral);
        assert_eq!(FearGreedClassification::from_index(75), Greed);
        assert_eq!(FearGreedClassification::from_index(76), ExtremeGreed);
    }

    #[test]
    fn test_reading_clamps_value() {
        let reading = FearGreedReading::new(140, Utc::now(), "test");
        assert_eq!(reading.value, 100);
        assert_eq!(reading.classification, FearGreedClassification::ExtremeGreed);
        assert_eq!(reading.classification.to_string(), "Extreme Greed");
    }
}
