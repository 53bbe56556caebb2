//! Data provider configuration parsing from environment variables.
//!
//! Endpoints, credentials and HTTP client limits for CoinGecko and the
//! Fear & Greed index.

use super::parse_env;
use anyhow::Result;
use std::env;

pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_FEAR_GREED_URL: &str = "https://api.alternative.me/fng/";

/// Provider environment configuration
#[derive(Debug, Clone)]
pub struct ProviderEnvConfig {
    pub coingecko_base_url: String,
    pub coingecko_api_key: Option<String>,
    pub fear_greed_url: String,
    pub top_coins_limit: usize,
    pub http_timeout_secs: u64,
    pub http_max_retries: u32,
}

impl Default for ProviderEnvConfig {
    fn default() -> Self {
        Self {
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            coingecko_api_key: None,
            fear_greed_url: DEFAULT_FEAR_GREED_URL.to_string(),
            top_coins_limit: 20,
            http_timeout_secs: 30,
            http_max_retries: 3,
        }
    }
}

impl ProviderEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let top_coins_limit = parse_env("TOP_COINS_LIMIT", defaults.top_coins_limit)?;
        if top_coins_limit == 0 || top_coins_limit > 250 {
            anyhow::bail!(
                "Invalid TOP_COINS_LIMIT: {}. Must be between 1 and 250",
                top_coins_limit
            );
        }

        Ok(Self {
            coingecko_base_url: env::var("COINGECKO_BASE_URL")
                .unwrap_or(defaults.coingecko_base_url),
            coingecko_api_key: env::var("COINGECKO_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            fear_greed_url: env::var("FEAR_GREED_URL").unwrap_or(defaults.fear_greed_url),
            top_coins_limit,
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            http_max_retries: parse_env("HTTP_MAX_RETRIES", defaults.http_max_retries)?,
        })
    }
}
