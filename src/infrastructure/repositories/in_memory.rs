//! In-Memory Repository Implementations
//!
//! Thread-safe, in-memory implementation of the daily snapshot cache.
//! Data is lost on restart; use it for tests and one-off runs where no
//! database file is wanted.

use crate::domain::market::daily_snapshot::DailySnapshot;
use crate::domain::repositories::DailySnapshotRepository;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct InMemoryDailySnapshotRepository {
    snapshots: Arc<RwLock<BTreeMap<NaiveDate, DailySnapshot>>>,
}

impl InMemoryDailySnapshotRepository {
    pub fn new() -> Self {
        Self {
            snapshots: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

impl Default for InMemoryDailySnapshotRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DailySnapshotRepository for InMemoryDailySnapshotRepository {
    async fn save(&self, snapshot: &DailySnapshot) -> Result<()> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.date, snapshot.clone());
        Ok(())
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailySnapshot>> {
        Ok(self.snapshots.read().await.get(&date).cloned())
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<DailySnapshot>> {
        let snapshots = self.snapshots.read().await;
        Ok(snapshots.values().rev().take(limit).cloned().collect())
    }

    async fn prune(&self, today: NaiveDate, retention_days: u32) -> Result<u64> {
        let cutoff = today
            .checked_sub_days(Days::new(retention_days as u64))
            .unwrap_or(NaiveDate::MIN);

        let mut snapshots = self.snapshots.write().await;
        let before = snapshots.len();
        snapshots.retain(|date, _| *date >= cutoff);
        Ok((before - snapshots.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::snapshot::MarketSnapshot;
    use crate::domain::scoring::{CompositeScorer, IndicatorScore};
    use chrono::Utc;

    fn snapshot_for(date: NaiveDate, fear_greed: u8) -> DailySnapshot {
        let snapshot = MarketSnapshot {
            total_market_cap: 3.0e12,
            peak_market_cap: 4.0e12,
            peak_market_cap_date: date,
            total_volume_24h: 1.0e11,
            avg_volume_30d: 1.0e11,
            fear_greed_index: fear_greed,
            top_coins: vec![],
            captured_at: Utc::now(),
        };
        let score = CompositeScorer::default().score(&IndicatorScore::from_snapshot(&snapshot));
        DailySnapshot::new(date, snapshot, score)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_save_replaces_same_date() {
        let repo = InMemoryDailySnapshotRepository::new();

        repo.save(&snapshot_for(day(1), 20)).await.unwrap();
        repo.save(&snapshot_for(day(1), 80)).await.unwrap();

        assert_eq!(repo.len().await, 1);
        let stored = repo.find_by_date(day(1)).await.unwrap().unwrap();
        assert_eq!(stored.snapshot.fear_greed_index, 80);
    }

    #[tokio::test]
    async fn test_find_recent_newest_first() {
        let repo = InMemoryDailySnapshotRepository::new();
        for d in [3, 1, 2] {
            repo.save(&snapshot_for(day(d), 50)).await.unwrap();
        }

        let recent = repo.find_recent(2).await.unwrap();
        let dates: Vec<NaiveDate> = recent.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![day(3), day(2)]);
    }

    #[tokio::test]
    async fn test_prune() {
        let repo = InMemoryDailySnapshotRepository::new();
        for d in 1..=10 {
            repo.save(&snapshot_for(day(d), 50)).await.unwrap();
        }

        // Keeps the 7th onwards when pruning 3 days back from the 10th
        let removed = repo.prune(day(10), 3).await.unwrap();
        assert_eq!(removed, 6);
        assert!(repo.find_by_date(day(6)).await.unwrap().is_none());
        assert!(repo.find_by_date(day(7)).await.unwrap().is_some());
    }
}
