use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::application::{MacroScoreService, TechnicalAnalysisService};
use crate::config::Config;
use crate::domain::ports::MarketDataProvider;
use crate::domain::repositories::DailySnapshotRepository;
use crate::domain::scoring::CompositeScorer;
use crate::domain::sentiment::SentimentProvider;
use crate::domain::technical::TechnicalParams;
use crate::infrastructure::mock::{MockMarketDataProvider, MockSentimentProvider};
use crate::infrastructure::{
    AlternativeMeSentimentProvider, CoinGeckoProvider, Database, InMemoryDailySnapshotRepository,
    SqliteDailySnapshotRepository,
};

/// Where market inputs come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// CoinGecko + Alternative.me, SQLite cache
    Live,
    /// Deterministic mock data, in-memory cache
    Mock,
}

pub struct ServiceHandle {
    pub macro_score: MacroScoreService,
    pub technical: TechnicalAnalysisService,
}

pub struct ServicesBootstrap;

impl ServicesBootstrap {
    pub async fn init(config: &Config, source: DataSource) -> Result<ServiceHandle> {
        let (market_data, sentiment, repository): (
            Arc<dyn MarketDataProvider>,
            Arc<dyn SentimentProvider>,
            Arc<dyn DailySnapshotRepository>,
        ) = match source {
            DataSource::Live => {
                let db = Database::new(&config.persistence.database_url)
                    .await
                    .context("Failed to initialize snapshot database")?;
                (
                    Arc::new(CoinGeckoProvider::new(&config.provider)),
                    Arc::new(AlternativeMeSentimentProvider::new(&config.provider)),
                    Arc::new(SqliteDailySnapshotRepository::new(db.pool)),
                )
            }
            DataSource::Mock => (
                Arc::new(MockMarketDataProvider::default()),
                Arc::new(MockSentimentProvider::new(55)),
                Arc::new(InMemoryDailySnapshotRepository::new()),
            ),
        };
        info!("Services initialized with {:?} data source", source);

        let scorer = CompositeScorer::new(config.scoring.weights, config.scoring.thresholds);

        Ok(ServiceHandle {
            macro_score: MacroScoreService::new(
                market_data.clone(),
                sentiment,
                repository,
                scorer,
                config.scoring.reference_peak,
                config.provider.top_coins_limit,
            ),
            technical: TechnicalAnalysisService::new(market_data, TechnicalParams::default()),
        })
    }
}
