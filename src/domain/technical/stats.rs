/// Crypto trades every day of the year
pub const CRYPTO_PERIODS_PER_YEAR: f64 = 365.0;

/// Shared statistics helpers for return series.
pub struct Stats;

impl Stats {
    /// Simple returns between consecutive prices, as fractions.
    ///
    /// Pairs with a non-positive predecessor are skipped.
    pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
        prices
            .windows(2)
            .filter(|w| w[0] > 0.0 && w[0].is_finite() && w[1].is_finite())
            .map(|w| (w[1] - w[0]) / w[0])
            .collect()
    }

    /// Sharpe ratio of per-period `returns`.
    ///
    /// `risk_free_rate` is annual and de-annualised over `periods_per_year`;
    /// the ratio is annualised by `sqrt(periods_per_year)`. Uses sample
    /// standard deviation (n-1). Returns 0 for fewer than two returns or a
    /// flat series.
    pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> f64 {
        if returns.len() < 2 || periods_per_year <= 0.0 || !periods_per_year.is_finite() {
            return 0.0;
        }
        if returns.iter().any(|r| !r.is_finite()) || !risk_free_rate.is_finite() {
            return 0.0;
        }

        let per_period_rf = risk_free_rate / periods_per_year;
        let n = returns.len() as f64;
        let mean_excess = returns.iter().map(|r| r - per_period_rf).sum::<f64>() / n;
        let mean_return = returns.iter().sum::<f64>() / n;

        let variance = returns
            .iter()
            .map(|r| {
                let diff = r - mean_return;
                diff * diff
            })
            .sum::<f64>()
            / (n - 1.0);
        let std_dev = variance.sqrt();

        if std_dev > 1e-12 {
            mean_excess / std_dev * periods_per_year.sqrt()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_returns() {
        let returns = Stats::simple_returns(&[100.0, 110.0, 99.0]);
        assert!((returns[0] - 0.10).abs() < 1e-12);
        assert!((returns[1] + 0.10).abs() < 1e-12);
        assert!(Stats::simple_returns(&[0.0, 1.0]).is_empty());
    }

    #[test]
    fn test_sharpe_ratio_sign() {
        let positive = [0.01, 0.02, 0.015, 0.005, 0.01];
        assert!(Stats::sharpe_ratio(&positive, 0.0, CRYPTO_PERIODS_PER_YEAR) > 0.0);

        let negative = [-0.01, -0.02, -0.015, -0.005, -0.01];
        assert!(Stats::sharpe_ratio(&negative, 0.0, CRYPTO_PERIODS_PER_YEAR) < 0.0);
    }

    #[test]
    fn test_sharpe_ratio_known_value() {
        // mean 0.01, sample std dev 0.01, one period per year
        let returns = [0.0, 0.01, 0.02];
        let sharpe = Stats::sharpe_ratio(&returns, 0.0, 1.0);
        assert!((sharpe - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sharpe_ratio_guards() {
        assert_eq!(Stats::sharpe_ratio(&[0.01], 0.0, 365.0), 0.0);
        assert_eq!(Stats::sharpe_ratio(&[0.01, 0.01, 0.01], 0.0, 365.0), 0.0);
        assert_eq!(Stats::sharpe_ratio(&[0.01, 0.02], 0.0, 0.0), 0.0);
        assert_eq!(Stats::sharpe_ratio(&[0.01, f64::NAN], 0.0, 365.0), 0.0);
    }
}
