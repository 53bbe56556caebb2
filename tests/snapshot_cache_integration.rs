use chrono::{NaiveDate, Utc};
use market_pulse::domain::market::daily_snapshot::DailySnapshot;
use market_pulse::domain::market::snapshot::{CoinSnapshot, MarketSnapshot};
use market_pulse::domain::repositories::DailySnapshotRepository;
use market_pulse::domain::scoring::{CompositeScorer, IndicatorScore};
use market_pulse::infrastructure::{Database, SqliteDailySnapshotRepository};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, d).unwrap()
}

fn daily(date: NaiveDate, fear_greed: u8) -> DailySnapshot {
    let snapshot = MarketSnapshot {
        total_market_cap: 3.2e12,
        peak_market_cap: 4.38e12,
        peak_market_cap_date: NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
        total_volume_24h: 9.0e10,
        avg_volume_30d: 1.0e11,
        fear_greed_index: fear_greed,
        top_coins: vec![
            CoinSnapshot::new("bitcoin", "BTC", 100_000.0, 126_000.0, 1.5),
            CoinSnapshot::new("ethereum", "ETH", 3_500.0, 4_950.0, -2.0),
        ],
        captured_at: Utc::now(),
    };
    let score = CompositeScorer::default().score(&IndicatorScore::from_snapshot(&snapshot));
    DailySnapshot::new(date, snapshot, score)
}

async fn repository() -> SqliteDailySnapshotRepository {
    let db = Database::in_memory().await.expect("in-memory database");
    SqliteDailySnapshotRepository::new(db.pool)
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let repo = repository().await;
    let saved = daily(day(10, 19), 42);
    repo.save(&saved).await.unwrap();

    let loaded = repo.find_by_date(day(10, 19)).await.unwrap().unwrap();
    assert_eq!(loaded.date, saved.date);
    assert_eq!(loaded.snapshot, saved.snapshot);
    assert_eq!(loaded.score, saved.score);
    // Stored at second precision
    assert_eq!(loaded.created_at.timestamp(), saved.created_at.timestamp());

    assert!(repo.find_by_date(day(10, 18)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_replaces_same_day() {
    let repo = repository().await;
    repo.save(&daily(day(10, 19), 20)).await.unwrap();
    repo.save(&daily(day(10, 19), 80)).await.unwrap();

    let all = repo.find_recent(10).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].snapshot.fear_greed_index, 80);
    assert_eq!(all[0].score.components.fear_greed, 80);
}

#[tokio::test]
async fn test_find_recent_is_newest_first_and_limited() {
    let repo = repository().await;
    for d in [3, 1, 5, 2, 4] {
        repo.save(&daily(day(10, d), 50)).await.unwrap();
    }

    let recent = repo.find_recent(3).await.unwrap();
    let dates: Vec<NaiveDate> = recent.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![day(10, 5), day(10, 4), day(10, 3)]);
}

#[tokio::test]
async fn test_prune_respects_retention_window() {
    let repo = repository().await;
    repo.save(&daily(day(9, 1), 50)).await.unwrap();
    repo.save(&daily(day(10, 12), 50)).await.unwrap();
    repo.save(&daily(day(10, 19), 50)).await.unwrap();

    // Cutoff 2026-10-12 is kept
    let removed = repo.prune(day(10, 19), 7).await.unwrap();
    assert_eq!(removed, 1);

    let remaining: Vec<NaiveDate> = repo
        .find_recent(10)
        .await
        .unwrap()
        .iter()
        .map(|s| s.date)
        .collect();
    assert_eq!(remaining, vec![day(10, 19), day(10, 12)]);

    assert_eq!(repo.prune(day(10, 19), 7).await.unwrap(), 0);
}
