use super::models::{CoinMarketRow, GlobalResponse, MarketCapChartResponse, MarketChartResponse};
use crate::config::ProviderEnvConfig;
use crate::domain::errors::MarketDataError;
use crate::domain::market::metrics::{CoinMarket, GlobalMetrics, PricePoint};
use crate::domain::ports::MarketDataProvider;
use crate::infrastructure::core::{HttpClientFactory, endpoint_url};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

const PROVIDER: &str = "CoinGecko";

pub struct CoinGeckoProvider {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new(config: &ProviderEnvConfig) -> Self {
        Self {
            client: HttpClientFactory::create_client(config),
            base_url: config.coingecko_base_url.trim_end_matches('/').to_string(),
            api_key: config.coingecko_api_key.clone(),
        }
    }

    /// Pro keys go to the pro host; anything else is sent as a demo key
    fn api_key_header(&self) -> &'static str {
        if self.base_url.contains("pro-api.") {
            "x-cg-pro-api-key"
        } else {
            "x-cg-demo-api-key"
        }
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = endpoint_url(&self.base_url, path, params)?;
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header(self.api_key_header(), key);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to CoinGecko {}", path))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(MarketDataError::RateLimitExceeded {
                provider: PROVIDER,
                retry_after_secs,
            }
            .into());
        }
        if !status.is_success() {
            return Err(MarketDataError::BadStatus {
                provider: PROVIDER,
                status: status.as_u16(),
            }
            .into());
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse CoinGecko {} response", path))
    }

    /// Trailing 30-day average volume. The chart endpoint is not available on
    /// every plan, so failure here only degrades the volume score.
    async fn average_volume_30d(&self) -> Option<f64> {
        match self
            .get_json::<MarketCapChartResponse>(
                "/global/market_cap_chart",
                &[("vs_currency", "usd"), ("days", "30")],
            )
            .await
        {
            Ok(chart) => chart.market_cap_chart.average_volume(),
            Err(e) => {
                warn!("30d volume history unavailable: {:#}", e);
                None
            }
        }
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn global_metrics(&self) -> Result<GlobalMetrics> {
        let (global, avg_volume_30d) = tokio::join!(
            self.get_json::<GlobalResponse>("/global", &[]),
            self.average_volume_30d()
        );

        let metrics = global?
            .data
            .into_metrics(avg_volume_30d)
            .ok_or(MarketDataError::MissingField {
                provider: PROVIDER,
                field: "total_market_cap.usd / total_volume.usd",
            })?;

        info!(
            "Global metrics: cap=${:.3e}, vol24h=${:.3e}, avg30d={:?}",
            metrics.total_market_cap, metrics.total_volume_24h, metrics.avg_volume_30d
        );
        Ok(metrics)
    }

    async fn top_coins(&self, limit: usize) -> Result<Vec<CoinMarket>> {
        let per_page = limit.to_string();
        let rows: Vec<CoinMarketRow> = self
            .get_json(
                "/coins/markets",
                &[
                    ("vs_currency", "usd"),
                    ("order", "market_cap_desc"),
                    ("per_page", per_page.as_str()),
                    ("page", "1"),
                    ("sparkline", "false"),
                ],
            )
            .await?;

        let coins: Vec<CoinMarket> = rows.into_iter().take(limit).map(Into::into).collect();
        info!("Fetched {} top coins", coins.len());
        Ok(coins)
    }

    async fn coin_market(&self, coin_id: &str) -> Result<Option<CoinMarket>> {
        let rows: Vec<CoinMarketRow> = self
            .get_json("/coins/markets", &[("vs_currency", "usd"), ("ids", coin_id)])
            .await?;

        Ok(rows.into_iter().next().map(Into::into))
    }

    async fn price_history(&self, coin_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let days = days.to_string();
        let path = format!("/coins/{}/market_chart", coin_id);
        let chart: MarketChartResponse = self
            .get_json(
                &path,
                &[
                    ("vs_currency", "usd"),
                    ("days", days.as_str()),
                    ("interval", "daily"),
                ],
            )
            .await?;

        let points = chart.into_price_points();
        debug!("Fetched {} price points for {}", points.len(), coin_id);
        Ok(points)
    }
}
