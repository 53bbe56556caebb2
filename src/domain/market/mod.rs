// Market data domain
pub mod daily_snapshot;
pub mod metrics;
pub mod snapshot;
