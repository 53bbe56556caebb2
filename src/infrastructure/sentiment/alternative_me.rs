use crate::config::ProviderEnvConfig;
use crate::domain::errors::MarketDataError;
use crate::domain::sentiment::{FearGreedReading, SentimentProvider};
use crate::infrastructure::core::{HttpClientFactory, endpoint_url};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info};

const SOURCE: &str = "Alternative.me (Crypto Fear & Greed)";

#[derive(Debug, Deserialize)]
struct AlternativeMeResponse {
    data: Vec<AlternativeMeData>,
}

#[derive(Debug, Deserialize)]
struct AlternativeMeData {
    value: String,
    timestamp: String,
}

pub struct AlternativeMeSentimentProvider {
    client: ClientWithMiddleware,
    url: String,
}

impl AlternativeMeSentimentProvider {
    pub fn new(config: &ProviderEnvConfig) -> Self {
        Self {
            client: HttpClientFactory::create_client(config),
            url: config.fear_greed_url.clone(),
        }
    }

    fn parse_response(body: AlternativeMeResponse) -> anyhow::Result<FearGreedReading> {
        let Some(data) = body.data.first() else {
            return Err(MarketDataError::MissingField {
                provider: "Alternative.me",
                field: "data[0]",
            }
            .into());
        };

        let value: u8 = data
            .value
            .trim()
            .parse()
            .context("Failed to parse sentiment value")?;
        let timestamp_secs: i64 = data
            .timestamp
            .trim()
            .parse()
            .context("Failed to parse timestamp")?;
        let timestamp = Utc
            .timestamp_opt(timestamp_secs, 0)
            .single()
            .context("Sentiment timestamp out of range")?;

        // Classification is re-derived from the value, not taken from the payload
        Ok(FearGreedReading::new(value, timestamp, SOURCE))
    }
}

#[async_trait]
impl SentimentProvider for AlternativeMeSentimentProvider {
    async fn fetch_sentiment(&self) -> anyhow::Result<FearGreedReading> {
        debug!("Fetching sentiment from Alternative.me...");

        let url = endpoint_url(&self.url, "", &[("limit", "1")])?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request to Alternative.me")?;

        if !response.status().is_success() {
            return Err(MarketDataError::BadStatus {
                provider: "Alternative.me",
                status: response.status().as_u16(),
            }
            .into());
        }

        let body: AlternativeMeResponse = response
            .json()
            .await
            .context("Failed to parse Alternative.me response")?;

        let reading = Self::parse_response(body)?;
        info!(
            "Fetched Fear & Greed: {} ({}) at {}",
            reading.value, reading.classification, reading.timestamp
        );
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::FearGreedClassification;

    fn parse(json: &str) -> anyhow::Result<FearGreedReading> {
        let body: AlternativeMeResponse = serde_json::from_str(json)?;
        AlternativeMeSentimentProvider::parse_response(body)
    }

    #[test]
    fn test_parse_payload() {
        let reading = parse(
            r#"{
                "name": "Fear and Greed Index",
                "data": [{
                    "value": "72",
                    "value_classification": "Greed",
                    "timestamp": "1760832000",
                    "time_until_update": "3600"
                }],
                "metadata": { "error": null }
            }"#,
        )
        .unwrap();

        assert_eq!(reading.value, 72);
        assert_eq!(reading.classification, FearGreedClassification::Greed);
        assert_eq!(reading.timestamp.timestamp(), 1_760_832_000);
    }

    #[test]
    fn test_parse_empty_data() {
        let err = parse(r#"{ "data": [] }"#).unwrap_err();
        assert!(err.to_string().contains("data[0]"));
    }

    #[test]
    fn test_parse_bad_value() {
        assert!(parse(r#"{ "data": [{ "value": "high", "timestamp": "1" }] }"#).is_err());
    }
}
