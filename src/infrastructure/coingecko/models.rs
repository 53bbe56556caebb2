//! CoinGecko wire types and their conversion into domain types

use crate::domain::market::metrics::{CoinMarket, GlobalMetrics, PricePoint};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct GlobalResponse {
    pub data: GlobalData,
}

#[derive(Debug, Deserialize)]
pub struct GlobalData {
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    pub market_cap_change_percentage_24h_usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct MarketCapChartResponse {
    pub market_cap_chart: MarketCapChart,
}

#[derive(Debug, Deserialize)]
pub struct MarketCapChart {
    #[serde(default)]
    pub volume: Vec<(f64, f64)>,
}

impl MarketCapChart {
    /// Mean of the daily volume samples; `None` when there is nothing usable
    pub fn average_volume(&self) -> Option<f64> {
        let samples: Vec<f64> = self
            .volume
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();

        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

/// Row of `/coins/markets`; CoinGecko sends null for unknown values
#[derive(Debug, Deserialize)]
pub struct CoinMarketRow {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub ath: Option<f64>,
    pub atl: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

impl From<CoinMarketRow> for CoinMarket {
    fn from(row: CoinMarketRow) -> Self {
        Self {
            id: row.id,
            symbol: row.symbol.to_uppercase(),
            name: row.name,
            current_price: row.current_price,
            market_cap: row.market_cap.unwrap_or(0.0),
            total_volume: row.total_volume.unwrap_or(0.0),
            all_time_high: row.ath.unwrap_or(0.0),
            all_time_low: row.atl.unwrap_or(0.0),
            price_change_percent_24h: row.price_change_percentage_24h.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<(f64, f64)>,
}

impl MarketChartResponse {
    /// Price points in chronological order; unparseable timestamps are dropped
    pub fn into_price_points(self) -> Vec<PricePoint> {
        let mut points: Vec<PricePoint> = self
            .prices
            .into_iter()
            .filter_map(|(ts_ms, price)| {
                let timestamp = Utc.timestamp_millis_opt(ts_ms as i64).single()?;
                Some(PricePoint { timestamp, price })
            })
            .collect();
        points.sort_by_key(|p| p.timestamp);
        points
    }
}

impl GlobalData {
    pub fn into_metrics(self, avg_volume_30d: Option<f64>) -> Option<GlobalMetrics> {
        Some(GlobalMetrics {
            total_market_cap: *self.total_market_cap.get("usd")?,
            total_volume_24h: *self.total_volume.get("usd")?,
            avg_volume_30d,
            market_cap_change_pct_24h: self.market_cap_change_percentage_24h_usd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::snapshot::CoinSnapshot;
    use crate::domain::scoring::ath_score;

    #[test]
    fn test_global_into_metrics() {
        let body: GlobalResponse = serde_json::from_str(
            r#"{"data": {
                "active_cryptocurrencies": 17000,
                "total_market_cap": {"usd": 3.9e12, "eur": 3.4e12},
                "total_volume": {"usd": 1.2e11},
                "market_cap_change_percentage_24h_usd": -1.5
            }}"#,
        )
        .unwrap();

        let metrics = body.data.into_metrics(Some(1.0e11)).unwrap();
        assert_eq!(metrics.total_market_cap, 3.9e12);
        assert_eq!(metrics.total_volume_24h, 1.2e11);
        assert_eq!(metrics.avg_volume_30d, Some(1.0e11));
        assert_eq!(metrics.market_cap_change_pct_24h, Some(-1.5));
    }

    #[test]
    fn test_global_without_usd_is_rejected() {
        let body: GlobalResponse =
            serde_json::from_str(r#"{"data": {"total_market_cap": {"eur": 1.0}}}"#).unwrap();
        assert!(body.data.into_metrics(None).is_none());
    }

    #[test]
    fn test_average_volume() {
        let chart: MarketCapChartResponse = serde_json::from_str(
            r#"{"market_cap_chart": {
                "market_cap": [[1700000000000, 1.0]],
                "volume": [[1700000000000, 100.0], [1700086400000, 300.0], [1700172800000, 0.0]]
            }}"#,
        )
        .unwrap();
        assert_eq!(chart.market_cap_chart.average_volume(), Some(200.0));

        let empty = MarketCapChart { volume: vec![] };
        assert_eq!(empty.average_volume(), None);
    }

    #[test]
    fn test_market_row_with_nulls() {
        let rows: Vec<CoinMarketRow> = serde_json::from_str(
            r#"[{
                "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
                "current_price": 67000.0, "market_cap": 1.3e12, "total_volume": 3.0e10,
                "ath": 126000.0, "atl": 67.81, "price_change_percentage_24h": null
            }]"#,
        )
        .unwrap();

        let coin: CoinMarket = rows.into_iter().next().unwrap().into();
        assert_eq!(coin.symbol, "BTC");
        assert_eq!(coin.all_time_high, 126000.0);
        assert_eq!(coin.price_change_percent_24h, 0.0);
    }

    #[test]
    fn test_unquoted_coin_is_left_out_of_ath_score() {
        let rows: Vec<CoinMarketRow> = serde_json::from_str(
            r#"[
                {"id": "a", "symbol": "a", "name": "A", "current_price": 100.0,
                 "market_cap": null, "total_volume": null, "ath": 100.0, "atl": 1.0,
                 "price_change_percentage_24h": 1.0},
                {"id": "b", "symbol": "b", "name": "B", "current_price": null,
                 "market_cap": null, "total_volume": null, "ath": 50.0, "atl": 1.0,
                 "price_change_percentage_24h": null}
            ]"#,
        )
        .unwrap();

        let coins: Vec<CoinMarket> = rows.into_iter().map(Into::into).collect();
        assert_eq!(coins[1].current_price, None);

        let snapshots: Vec<CoinSnapshot> = coins.iter().map(CoinSnapshot::from).collect();
        assert_eq!(ath_score(&snapshots), 100);
    }

    #[test]
    fn test_price_points_sorted() {
        let chart: MarketChartResponse = serde_json::from_str(
            r#"{"prices": [[1700086400000, 2.0], [1700000000000, 1.0]], "total_volumes": []}"#,
        )
        .unwrap();

        let points = chart.into_price_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].price, 1.0);
        assert_eq!(points[1].price, 2.0);
    }
}
