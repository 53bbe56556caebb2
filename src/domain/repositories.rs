//! Repository abstractions
//!
//! The daily snapshot cache keeps one macro reading per calendar day so a
//! score is not recomputed (and providers are not re-queried) within a day.
//!
//! Two implementations live in `infrastructure`:
//! - `SqliteDailySnapshotRepository` for persistent storage
//! - `InMemoryDailySnapshotRepository` for tests and ephemeral runs

use crate::domain::market::daily_snapshot::DailySnapshot;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait DailySnapshotRepository: Send + Sync {
    /// Insert or replace the snapshot for its date
    async fn save(&self, snapshot: &DailySnapshot) -> Result<()>;

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailySnapshot>>;

    /// Most recent snapshots, newest first
    async fn find_recent(&self, limit: usize) -> Result<Vec<DailySnapshot>>;

    /// Delete snapshots dated before `today - retention_days`; returns rows removed
    async fn prune(&self, today: NaiveDate, retention_days: u32) -> Result<u64>;
}
