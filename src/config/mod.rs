//! Configuration module for market-pulse.
//!
//! Structured configuration loading from environment variables, organized by
//! concern: data providers, scoring and persistence.

mod persistence_config;
mod provider_config;
mod scoring_config;

pub use persistence_config::{DEFAULT_DATABASE_URL, PersistenceEnvConfig};
pub use provider_config::{DEFAULT_COINGECKO_BASE_URL, DEFAULT_FEAR_GREED_URL, ProviderEnvConfig};
pub use scoring_config::{
    DEFAULT_PEAK_MARKET_CAP_DATE, DEFAULT_PEAK_MARKET_CAP_USD, ScoringEnvConfig,
};

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderEnvConfig,
    pub scoring: ScoringEnvConfig,
    pub persistence: PersistenceEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let provider =
            ProviderEnvConfig::from_env().context("Failed to load provider config")?;
        let scoring = ScoringEnvConfig::from_env().context("Failed to load scoring config")?;
        let persistence =
            PersistenceEnvConfig::from_env().context("Failed to load persistence config")?;

        Ok(Self {
            provider,
            scoring,
            persistence,
        })
    }
}

/// Read `key` from the environment, falling back to `default` when unset
pub(crate) fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .context(format!("Failed to parse {}", key)),
        Err(_) => Ok(default),
    }
}
