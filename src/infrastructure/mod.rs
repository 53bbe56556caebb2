pub mod coingecko;
pub mod core;
pub mod mock;
pub mod persistence;
pub mod repositories;
pub mod sentiment;

pub use coingecko::CoinGeckoProvider;
pub use persistence::{Database, SqliteDailySnapshotRepository};
pub use repositories::InMemoryDailySnapshotRepository;
pub use sentiment::AlternativeMeSentimentProvider;
