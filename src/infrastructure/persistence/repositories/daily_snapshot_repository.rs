use crate::domain::market::daily_snapshot::DailySnapshot;
use crate::domain::repositories::DailySnapshotRepository;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Days, NaiveDate, TimeZone, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

pub struct SqliteDailySnapshotRepository {
    pool: SqlitePool,
}

impl SqliteDailySnapshotRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn map_row(row: &SqliteRow) -> Result<DailySnapshot> {
        let date_str: String = row.try_get("snapshot_date")?;
        let snapshot_json: String = row.try_get("snapshot_json")?;
        let score_json: String = row.try_get("score_json")?;
        let created_at: i64 = row.try_get("created_at")?;

        Ok(DailySnapshot {
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
                .with_context(|| format!("Corrupt snapshot date: {}", date_str))?,
            snapshot: serde_json::from_str(&snapshot_json)
                .context("Failed to deserialize market snapshot")?,
            score: serde_json::from_str(&score_json)
                .context("Failed to deserialize macro score")?,
            created_at: Utc
                .timestamp_opt(created_at, 0)
                .single()
                .context("Corrupt snapshot created_at")?,
        })
    }
}

#[async_trait]
impl DailySnapshotRepository for SqliteDailySnapshotRepository {
    async fn save(&self, snapshot: &DailySnapshot) -> Result<()> {
        let snapshot_json = serde_json::to_string(&snapshot.snapshot)?;
        let score_json = serde_json::to_string(&snapshot.score)?;

        sqlx::query(
            r#"
            INSERT INTO daily_snapshots
            (snapshot_date, macro_score, label, snapshot_json, score_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(snapshot_date) DO UPDATE SET
                macro_score = excluded.macro_score,
                label = excluded.label,
                snapshot_json = excluded.snapshot_json,
                score_json = excluded.score_json,
                created_at = excluded.created_at
            "#,
        )
        .bind(snapshot.date.to_string())
        .bind(snapshot.score.value as i64)
        .bind(snapshot.score.label.to_string())
        .bind(snapshot_json)
        .bind(score_json)
        .bind(snapshot.created_at.timestamp())
        .execute(&self.pool)
        .await
        .context("Failed to save daily snapshot")?;

        debug!("Persisted daily snapshot {}", snapshot.date);
        Ok(())
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<DailySnapshot>> {
        let row = sqlx::query("SELECT * FROM daily_snapshots WHERE snapshot_date = ?")
            .bind(date.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<DailySnapshot>> {
        let rows = sqlx::query("SELECT * FROM daily_snapshots ORDER BY snapshot_date DESC LIMIT ?")
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn prune(&self, today: NaiveDate, retention_days: u32) -> Result<u64> {
        let cutoff = today
            .checked_sub_days(Days::new(retention_days as u64))
            .unwrap_or(NaiveDate::MIN);

        let result = sqlx::query("DELETE FROM daily_snapshots WHERE snapshot_date < ?")
            .bind(cutoff.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to prune daily snapshots")?;

        info!(
            "Pruned {} daily snapshots older than {}",
            result.rows_affected(),
            cutoff
        );
        Ok(result.rows_affected())
    }
}
