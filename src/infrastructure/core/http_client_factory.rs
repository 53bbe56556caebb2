use crate::config::ProviderEnvConfig;
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

const USER_AGENT: &str = concat!("market-pulse/", env!("CARGO_PKG_VERSION"));

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// HTTP client with exponential-backoff retries on transient failures
    pub fn create_client(config: &ProviderEnvConfig) -> ClientWithMiddleware {
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.http_max_retries);

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}

/// `base_url` + `path` with `params` appended to the query string.
///
/// reqwest-middleware's request builder has no `.query()`, so the URL is
/// assembled up front.
pub fn endpoint_url(base_url: &str, path: &str, params: &[(&str, &str)]) -> Result<Url> {
    let raw = format!("{}{}", base_url, path);
    let mut url = Url::parse(&raw).with_context(|| format!("Invalid endpoint URL: {}", raw))?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_encodes_params() {
        let url = endpoint_url(
            "https://api.coingecko.com/api/v3",
            "/coins/markets",
            &[("vs_currency", "usd"), ("ids", "bitcoin,ethereum")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.coingecko.com/api/v3/coins/markets?vs_currency=usd&ids=bitcoin%2Cethereum"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_existing_query() {
        let url = endpoint_url("https://x.io/fng/?format=json", "", &[("limit", "1")]).unwrap();
        assert_eq!(url.as_str(), "https://x.io/fng/?format=json&limit=1");

        let bare = endpoint_url("https://x.io/fng/", "", &[]).unwrap();
        assert_eq!(bare.as_str(), "https://x.io/fng/");

        assert!(endpoint_url("not a url", "/global", &[]).is_err());
    }
}
