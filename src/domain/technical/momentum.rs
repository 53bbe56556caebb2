use serde::{Deserialize, Serialize};
use std::fmt;
use ta::Next;
use ta::indicators::{MovingAverageConvergenceDivergence, RelativeStrengthIndex};

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;
pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// EMA crossover reading (MACD analogue) at the last price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSignal {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub direction: SignalDirection,
}

/// Run the fast/slow EMA spread and its signal line over `prices`.
///
/// Needs `0 < fast < slow`, a non-zero signal period and at least `slow`
/// finite prices.
pub fn price_signal(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Option<PriceSignal> {
    if fast == 0 || fast >= slow || prices.len() < slow {
        return None;
    }
    if prices.iter().any(|p| !p.is_finite()) {
        return None;
    }

    let mut macd = MovingAverageConvergenceDivergence::new(fast, slow, signal).ok()?;
    let output = prices.iter().fold(None, |_, price| Some(macd.next(*price)))?;

    let direction = if output.histogram > 0.0 {
        SignalDirection::Bullish
    } else if output.histogram < 0.0 {
        SignalDirection::Bearish
    } else {
        SignalDirection::Neutral
    };

    Some(PriceSignal {
        macd: output.macd,
        signal: output.signal,
        histogram: output.histogram,
        direction,
    })
}

/// Relative Strength Index of the last price, 0-100
pub fn rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() <= period || prices.iter().any(|p| !p.is_finite()) {
        return None;
    }

    let mut indicator = RelativeStrengthIndex::new(period).ok()?;
    prices
        .iter()
        .fold(None, |_, price| Some(indicator.next(*price)))
}
