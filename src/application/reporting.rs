//! Reporting utilities for macro scores and technical reports.
//!
//! Plain-text console rendering and JSON export.

use crate::domain::market::daily_snapshot::DailySnapshot;
use crate::domain::scoring::{IndicatorScore, ScoreWeights};
use crate::domain::technical::{FibonacciLevel, TechnicalReport};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

pub struct PulseReporter;

impl PulseReporter {
    pub fn render_daily(daily: &DailySnapshot, weights: &ScoreWeights) -> String {
        let mut out = String::new();
        let score = &daily.score;
        let snapshot = &daily.snapshot;

        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(
            out,
            "MACRO SCORE {}: {} / 100 ({})",
            daily.date, score.value, score.label
        );
        let _ = writeln!(out, "{}", "=".repeat(60));

        let names = [
            "Market cap vs peak",
            "Volume vs 30d",
            "Fear & Greed",
            "Distance from ATH",
            "Breadth",
        ];
        for ((name, bp), value) in names
            .iter()
            .zip(weights.basis_points())
            .zip(score.components.as_array())
        {
            let _ = writeln!(
                out,
                "  {:<20} {:>3}   (weight {:.1}%)",
                name,
                value,
                bp as f64 / 100.0
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  Market cap ${:.3e} / peak ${:.3e} ({})",
            snapshot.total_market_cap, snapshot.peak_market_cap, snapshot.peak_market_cap_date
        );
        let _ = writeln!(
            out,
            "  Volume 24h ${:.3e} / avg 30d ${:.3e}",
            snapshot.total_volume_24h, snapshot.avg_volume_30d
        );
        let _ = writeln!(
            out,
            "  Coins advancing: {} of {}",
            snapshot.advancing_coins(),
            snapshot.top_coins.len()
        );
        out
    }

    pub fn render_history(history: &[DailySnapshot]) -> String {
        if history.is_empty() {
            return "No cached snapshots.\n".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "{:<12} {:>5}  {:<8} {}", "DATE", "SCORE", "LABEL", "S1-S5");
        for daily in history {
            let _ = writeln!(
                out,
                "{:<12} {:>5}  {:<8} {}",
                daily.date.to_string(),
                daily.score.value,
                daily.score.label.to_string(),
                Self::components_line(&daily.score.components)
            );
        }
        out
    }

    pub fn render_technical(report: &TechnicalReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "TECHNICALS {}", report.coin_id);
        match report.current_price {
            Some(price) => {
                let _ = writeln!(out, "  Price:            {:.6}", price);
            }
            None => {
                let _ = writeln!(out, "  Price:            n/a");
            }
        }
        let _ = writeln!(out, "  Volatility index: {:.3}", report.volatility_index);
        let _ = writeln!(out, "  Liquidity ratio:  {:.4}", report.liquidity_ratio);
        let _ = writeln!(out, "  Sharpe ratio:     {:.3}", report.sharpe_ratio);

        match report.rsi {
            Some(rsi) => {
                let _ = writeln!(out, "  RSI:              {:.1}", rsi);
            }
            None => {
                let _ = writeln!(out, "  RSI:              insufficient history");
            }
        }
        match &report.price_signal {
            Some(signal) => {
                let _ = writeln!(
                    out,
                    "  Price signal:     {} (macd {:.4}, signal {:.4}, hist {:.4})",
                    signal.direction, signal.macd, signal.signal, signal.histogram
                );
            }
            None => {
                let _ = writeln!(out, "  Price signal:     insufficient history");
            }
        }
        if let Some(fib) = &report.fibonacci {
            let fmt_level = |level: Option<FibonacciLevel>| {
                level
                    .map(|l| format!("{:.6} ({:.1}%)", l.price, l.ratio * 100.0))
                    .unwrap_or_else(|| "none".to_string())
            };
            let _ = writeln!(out, "  Support:          {}", fmt_level(fib.support));
            let _ = writeln!(out, "  Resistance:       {}", fmt_level(fib.resistance));
        }
        out
    }

    /// Pretty-printed JSON for scripting
    pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).context("Failed to serialize report")
    }

    fn components_line(components: &IndicatorScore) -> String {
        components
            .as_array()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}
