pub mod daily_snapshot_repository;

pub use daily_snapshot_repository::SqliteDailySnapshotRepository;
