use crate::domain::market::snapshot::MarketSnapshot;
use crate::domain::scoring::MacroScore;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Macro score and its inputs, cached once per calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    pub date: NaiveDate,
    pub snapshot: MarketSnapshot,
    pub score: MacroScore,
    pub created_at: DateTime<Utc>,
}

impl DailySnapshot {
    pub fn new(date: NaiveDate, snapshot: MarketSnapshot, score: MacroScore) -> Self {
        Self {
            date,
            snapshot,
            score,
            created_at: Utc::now(),
        }
    }
}
