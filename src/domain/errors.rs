use thiserror::Error;

/// Errors raised while combining sub-scores into the macro score
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("Macro score unavailable: {component} sub-score is not finite ({value})")]
    Unavailable { component: &'static str, value: f64 },

    #[error("Invalid score weights {weights:?}: {reason}")]
    InvalidWeights { weights: Vec<f64>, reason: String },

    #[error("Invalid label thresholds: bearish {bearish} must be below bullish {bullish}")]
    InvalidThresholds { bearish: u8, bullish: u8 },
}

/// Errors related to upstream market data
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("{provider} returned status {status}")]
    BadStatus { provider: &'static str, status: u16 },

    #[error("{provider} response is missing {field}")]
    MissingField {
        provider: &'static str,
        field: &'static str,
    },

    #[error("Rate limit exceeded on {provider}: retry after {retry_after_secs}s")]
    RateLimitExceeded {
        provider: &'static str,
        retry_after_secs: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_formatting() {
        let error = ScoringError::Unavailable {
            component: "volume",
            value: f64::NAN,
        };

        let msg = error.to_string();
        assert!(msg.contains("volume"));
        assert!(msg.contains("NaN"));
    }

    #[test]
    fn test_market_data_error_formatting() {
        let error = MarketDataError::BadStatus {
            provider: "CoinGecko",
            status: 429,
        };
        assert_eq!(error.to_string(), "CoinGecko returned status 429");
    }
}
