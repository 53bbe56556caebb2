pub mod market_data;
pub mod models;

pub use market_data::CoinGeckoProvider;
