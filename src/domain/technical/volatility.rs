use statrs::statistics::Statistics;

/// Period-over-period percent changes.
///
/// Pairs with a non-positive or non-finite predecessor are skipped.
pub fn percent_changes(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0].is_finite() && w[1].is_finite() && w[0] > 0.0)
        .map(|w| (w[1] - w[0]) / w[0] * 100.0)
        .collect()
}

/// Volatility index: population standard deviation of percent changes.
///
/// Returns 0 when fewer than two finite changes are available.
pub fn volatility_index(percent_changes: &[f64]) -> f64 {
    let finite: Vec<f64> = percent_changes
        .iter()
        .copied()
        .filter(|c| c.is_finite())
        .collect();

    if finite.len() < 2 {
        return 0.0;
    }

    let std_dev = finite.iter().population_std_dev();
    if std_dev.is_finite() { std_dev } else { 0.0 }
}

/// Volume over market cap; 0 when the cap is unusable
pub fn liquidity_ratio(volume: f64, market_cap: f64) -> f64 {
    if !market_cap.is_finite() || market_cap <= 0.0 || !volume.is_finite() {
        return 0.0;
    }
    volume / market_cap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_changes() {
        let changes = percent_changes(&[100.0, 110.0, 99.0]);
        assert_eq!(changes.len(), 2);
        assert!((changes[0] - 10.0).abs() < 1e-9);
        assert!((changes[1] + 10.0).abs() < 1e-9);

        // Zero predecessor is skipped rather than dividing by zero
        assert_eq!(percent_changes(&[0.0, 5.0, 10.0]), vec![100.0]);
        assert!(percent_changes(&[42.0]).is_empty());
    }

    #[test]
    fn test_volatility_index() {
        // Alternating +10/-10 has a population std dev of exactly 10
        let vol = volatility_index(&[10.0, -10.0, 10.0, -10.0]);
        assert!((vol - 10.0).abs() < 1e-9);

        assert_eq!(volatility_index(&[5.0, 5.0, 5.0]), 0.0);
        assert_eq!(volatility_index(&[3.0]), 0.0);
        assert_eq!(volatility_index(&[]), 0.0);
        assert_eq!(volatility_index(&[f64::NAN, 1.0]), 0.0);
    }

    #[test]
    fn test_liquidity_ratio() {
        assert!((liquidity_ratio(5.0e9, 1.0e11) - 0.05).abs() < 1e-12);
        assert_eq!(liquidity_ratio(5.0e9, 0.0), 0.0);
        assert_eq!(liquidity_ratio(f64::NAN, 1.0), 0.0);
    }
}
