use serde::{Deserialize, Serialize};

/// Retracement ratios measured down from the all-time high
pub const FIBONACCI_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    pub ratio: f64,
    pub price: f64,
}

/// Support and resistance derived from the ATH/ATL range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevels {
    /// Ordered from the ATH (ratio 0) down to the ATL (ratio 1)
    pub levels: Vec<FibonacciLevel>,
    /// Nearest level at or below the current price
    pub support: Option<FibonacciLevel>,
    /// Nearest level strictly above the current price
    pub resistance: Option<FibonacciLevel>,
}

/// Compute retracement levels `ath - (ath - atl) * ratio`.
///
/// Returns `None` for non-finite inputs or when `ath <= atl`.
pub fn fibonacci_levels(ath: f64, atl: f64, current_price: f64) -> Option<FibonacciLevels> {
    if !ath.is_finite() || !atl.is_finite() || !current_price.is_finite() || ath <= atl {
        return None;
    }

    let range = ath - atl;
    let levels: Vec<FibonacciLevel> = FIBONACCI_RATIOS
        .iter()
        .map(|&ratio| FibonacciLevel {
            ratio,
            price: ath - range * ratio,
        })
        .collect();

    // Levels descend in price, so the first one at or below is the closest support
    let support = levels.iter().find(|l| l.price <= current_price).copied();
    let resistance = levels.iter().rev().find(|l| l.price > current_price).copied();

    Some(FibonacciLevels {
        levels,
        support,
        resistance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_between_range() {
        let fib = fibonacci_levels(100.0, 0.0, 55.0).unwrap();

        assert_eq!(fib.levels.len(), 7);
        assert_eq!(fib.levels[0].price, 100.0);
        assert_eq!(fib.levels[6].price, 0.0);

        let support = fib.support.unwrap();
        let resistance = fib.resistance.unwrap();
        assert_eq!(support.ratio, 0.5);
        assert!((resistance.price - 61.8).abs() < 1e-9);
    }

    #[test]
    fn test_price_outside_range() {
        let above = fibonacci_levels(100.0, 10.0, 150.0).unwrap();
        assert_eq!(above.support.unwrap().ratio, 0.0);
        assert!(above.resistance.is_none());

        let below = fibonacci_levels(100.0, 10.0, 5.0).unwrap();
        assert!(below.support.is_none());
        assert_eq!(below.resistance.unwrap().ratio, 1.0);
    }

    #[test]
    fn test_invalid_range() {
        assert!(fibonacci_levels(10.0, 10.0, 10.0).is_none());
        assert!(fibonacci_levels(5.0, 10.0, 7.0).is_none());
        assert!(fibonacci_levels(f64::NAN, 1.0, 1.0).is_none());
    }
}
