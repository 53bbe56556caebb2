use crate::domain::market::daily_snapshot::DailySnapshot;
use crate::domain::market::snapshot::{CoinSnapshot, MarketCapPeak, MarketSnapshot};
use crate::domain::ports::MarketDataProvider;
use crate::domain::repositories::DailySnapshotRepository;
use crate::domain::scoring::{CompositeScorer, IndicatorScore, MacroScore};
use crate::domain::sentiment::SentimentProvider;
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Collects a market snapshot, scores it and caches one result per day
pub struct MacroScoreService {
    market_data: Arc<dyn MarketDataProvider>,
    sentiment: Arc<dyn SentimentProvider>,
    repository: Arc<dyn DailySnapshotRepository>,
    scorer: CompositeScorer,
    reference_peak: MarketCapPeak,
    top_coins_limit: usize,
}

impl MacroScoreService {
    pub fn new(
        market_data: Arc<dyn MarketDataProvider>,
        sentiment: Arc<dyn SentimentProvider>,
        repository: Arc<dyn DailySnapshotRepository>,
        scorer: CompositeScorer,
        reference_peak: MarketCapPeak,
        top_coins_limit: usize,
    ) -> Self {
        Self {
            market_data,
            sentiment,
            repository,
            scorer,
            reference_peak,
            top_coins_limit,
        }
    }

    /// Fetch all inputs concurrently and assemble a snapshot.
    ///
    /// Every source is awaited to completion and each failure is logged; the
    /// snapshot is only built when all of them succeeded.
    pub async fn collect_snapshot(&self, today: NaiveDate) -> Result<MarketSnapshot> {
        let (global, coins, sentiment) = tokio::join!(
            self.market_data.global_metrics(),
            self.market_data.top_coins(self.top_coins_limit),
            self.sentiment.fetch_sentiment()
        );

        let mut failed = Vec::new();
        if let Err(e) = &global {
            warn!("Global metrics failed: {:#}", e);
            failed.push("global metrics");
        }
        if let Err(e) = &coins {
            warn!("Top coins failed: {:#}", e);
            failed.push("top coins");
        }
        if let Err(e) = &sentiment {
            warn!("Fear & Greed failed: {:#}", e);
            failed.push("fear & greed");
        }
        if !failed.is_empty() {
            anyhow::bail!("Market snapshot unavailable: {} failed", failed.join(", "));
        }

        let global = global?;
        let coins = coins?;
        let sentiment = sentiment?;

        let avg_volume_30d = global.avg_volume_30d.unwrap_or_else(|| {
            warn!("No 30d volume history; scoring volume against the current 24h volume");
            global.total_volume_24h
        });

        let peak = self.reference_peak.resolve(global.total_market_cap, today);
        if peak.date != self.reference_peak.date {
            info!(
                "Total market cap ${:.3e} is a new peak (previous ${:.3e} on {})",
                peak.value, self.reference_peak.value, self.reference_peak.date
            );
        }

        Ok(MarketSnapshot {
            total_market_cap: global.total_market_cap,
            peak_market_cap: peak.value,
            peak_market_cap_date: peak.date,
            total_volume_24h: global.total_volume_24h,
            avg_volume_30d,
            fear_greed_index: sentiment.value,
            top_coins: coins.iter().map(CoinSnapshot::from).collect(),
            captured_at: Utc::now(),
        })
    }

    pub fn scorer(&self) -> &CompositeScorer {
        &self.scorer
    }

    pub fn score_snapshot(&self, snapshot: &MarketSnapshot) -> MacroScore {
        let components = IndicatorScore::from_snapshot(snapshot);
        debug!("Sub-scores: {:?}", components);
        self.scorer.score(&components)
    }

    /// Today's macro score, served from the daily cache unless `refresh` is set
    pub async fn daily_score(&self, today: NaiveDate, refresh: bool) -> Result<DailySnapshot> {
        if !refresh
            && let Some(cached) = self
                .repository
                .find_by_date(today)
                .await
                .context("Failed to read daily snapshot cache")?
        {
            info!(
                "Using cached macro score for {}: {} ({})",
                today, cached.score.value, cached.score.label
            );
            return Ok(cached);
        }

        let snapshot = self.collect_snapshot(today).await?;
        let score = self.score_snapshot(&snapshot);
        let daily = DailySnapshot::new(today, snapshot, score);

        self.repository
            .save(&daily)
            .await
            .context("Failed to cache daily snapshot")?;

        info!(
            "Macro score for {}: {} ({})",
            today, daily.score.value, daily.score.label
        );
        Ok(daily)
    }

    /// Cached snapshot for a past date; never triggers a fetch
    pub async fn snapshot_for(&self, date: NaiveDate) -> Result<Option<DailySnapshot>> {
        self.repository.find_by_date(date).await
    }

    pub async fn history(&self, limit: usize) -> Result<Vec<DailySnapshot>> {
        self.repository.find_recent(limit).await
    }

    pub async fn prune(&self, today: NaiveDate, retention_days: u32) -> Result<u64> {
        self.repository.prune(today, retention_days).await
    }
}
