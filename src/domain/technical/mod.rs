//! Technical indicator set
//!
//! Standalone formulas feeding per-coin charts: volatility index, liquidity
//! ratio, Fibonacci support/resistance, EMA price signal, RSI and Sharpe ratio.

pub mod fibonacci;
pub mod momentum;
pub mod report;
pub mod stats;
pub mod volatility;

pub use fibonacci::{FibonacciLevel, FibonacciLevels, fibonacci_levels};
pub use momentum::{PriceSignal, SignalDirection, price_signal, rsi};
pub use report::{TechnicalInputs, TechnicalParams, TechnicalReport};
pub use stats::Stats;
pub use volatility::{liquidity_ratio, percent_changes, volatility_index};
