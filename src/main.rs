//! Market Pulse CLI
//!
//! Daily crypto macro score plus per-coin technicals.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use market_pulse::application::PulseReporter;
use market_pulse::application::bootstrap::{DataSource, ServicesBootstrap};
use market_pulse::config::Config;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about = "Crypto macro market score", long_about = None)]
struct Cli {
    /// Use deterministic mock data and an in-memory cache
    #[arg(long, global = true)]
    mock: bool,

    /// Print JSON instead of the console report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute (or read the cached) macro score
    Score {
        /// Past date to read from the cache (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Ignore today's cached score and fetch fresh data
        #[arg(long)]
        refresh: bool,
    },
    /// Technical indicators for a single coin
    Technicals {
        /// CoinGecko coin id (e.g. bitcoin)
        coin_id: String,

        /// Days of daily price history
        #[arg(short, long, default_value = "90")]
        days: u32,
    },
    /// Most recent cached scores
    History {
        #[arg(short, long, default_value = "7")]
        limit: usize,
    },
    /// Delete cached snapshots older than the retention window
    Prune,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
                .add_directive("sqlx=warn".parse()?),
        )
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let source = if cli.mock {
        DataSource::Mock
    } else {
        DataSource::Live
    };
    let services = ServicesBootstrap::init(&config, source).await?;
    let today = Utc::now().date_naive();

    match cli.command {
        Commands::Score { date, refresh } => {
            let daily = match date {
                Some(date) if date != today => services
                    .macro_score
                    .snapshot_for(date)
                    .await?
                    .with_context(|| format!("No cached macro score for {}", date))?,
                _ => services.macro_score.daily_score(today, refresh).await?,
            };

            if cli.json {
                println!("{}", PulseReporter::to_json(&daily)?);
            } else {
                print!(
                    "{}",
                    PulseReporter::render_daily(&daily, services.macro_score.scorer().weights())
                );
            }
        }
        Commands::Technicals { coin_id, days } => {
            let report = services.technical.analyze(&coin_id, days).await?;
            if cli.json {
                println!("{}", PulseReporter::to_json(&report)?);
            } else {
                print!("{}", PulseReporter::render_technical(&report));
            }
        }
        Commands::History { limit } => {
            let history = services.macro_score.history(limit).await?;
            if cli.json {
                println!("{}", PulseReporter::to_json(&history)?);
            } else {
                print!("{}", PulseReporter::render_history(&history));
            }
        }
        Commands::Prune => {
            let retention = config.persistence.snapshot_retention_days;
            let removed = services.macro_score.prune(today, retention).await?;
            info!(
                "Pruned {} cached snapshots older than {} days",
                removed, retention
            );
        }
    }

    Ok(())
}
