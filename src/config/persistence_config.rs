use super::parse_env;
use anyhow::Result;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/market_pulse.db";

/// Snapshot cache storage settings
#[derive(Debug, Clone)]
pub struct PersistenceEnvConfig {
    pub database_url: String,
    pub snapshot_retention_days: u32,
}

impl Default for PersistenceEnvConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            snapshot_retention_days: 365,
        }
    }
}

impl PersistenceEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            snapshot_retention_days: parse_env(
                "SNAPSHOT_RETENTION_DAYS",
                defaults.snapshot_retention_days,
            )?,
        })
    }
}
