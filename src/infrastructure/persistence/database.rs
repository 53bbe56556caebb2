use anyhow::{Context, Result};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::info;

/// SQLite pool wrapper; the schema is created on connect
#[derive(Clone)]
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    pub async fn new(db_url: &str) -> Result<Self> {
        if is_memory_url(db_url) {
            return Self::open_memory(db_url).await;
        }

        // Ensure the directory exists if it's a file path
        if let Some(path_part) = db_url.strip_prefix("sqlite://") {
            let path = Path::new(path_part);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                fs::create_dir_all(parent)
                    .await
                    .context("Failed to create database directory")?;
            }
        }

        let options = SqliteConnectOptions::from_str(db_url)
            .with_context(|| format!("Invalid database URL: {}", db_url))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        info!("Connected to database: {}", db_url);

        let db = Self { pool };
        db.init().await?;

        Ok(db)
    }

    /// Private in-memory database. A single connection, since every SQLite
    /// memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        Self::open_memory("sqlite::memory:").await
    }

    async fn open_memory(db_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(db_url)
            .with_context(|| format!("Invalid database URL: {}", db_url))?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        let db = Self { pool };
        db.init().await?;

        Ok(db)
    }

    /// Initialize database schema
    async fn init(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS daily_snapshots (
                snapshot_date TEXT PRIMARY KEY,
                macro_score INTEGER NOT NULL,
                label TEXT NOT NULL,
                snapshot_json TEXT NOT NULL,
                score_json TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&mut *conn)
        .await
        .context("Failed to create daily_snapshots table")?;

        info!("Database schema initialized.");
        Ok(())
    }
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_url_detection() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://:memory:"));
        assert!(is_memory_url("sqlite://file:cache?mode=memory"));
        assert!(!is_memory_url("sqlite://data/market_pulse.db"));
    }

    #[tokio::test]
    async fn test_memory_url_uses_single_connection() {
        let db = Database::new("sqlite::memory:").await.unwrap();
        assert_eq!(db.pool.options().get_max_connections(), 1);

        // Concurrent queries all see the schema
        let count = "SELECT COUNT(*) FROM daily_snapshots";
        let (a, b, c) = tokio::join!(
            sqlx::query_scalar::<_, i64>(count).fetch_one(&db.pool),
            sqlx::query_scalar::<_, i64>(count).fetch_one(&db.pool),
            sqlx::query_scalar::<_, i64>(count).fetch_one(&db.pool),
        );
        assert_eq!((a.unwrap(), b.unwrap(), c.unwrap()), (0, 0, 0));
    }
}
