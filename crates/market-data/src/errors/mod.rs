//! Error types for the market data crate.
//!
//! [`MarketDataError`] covers every way a provider batch can fail. The
//! aggregation layer never propagates these to callers; they are logged and
//! the affected asset class degrades to an empty result.

use thiserror::Error;

/// Errors that can occur while fetching a batch of quotes.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered, but not with something we can use.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// Authentication with the provider failed or expired.
    #[error("Unauthorized: {provider}")]
    Unauthorized {
        /// The provider that rejected the credentials
        provider: String,
    },
}

impl MarketDataError {
    /// Builds a `ProviderError` for the given provider id.
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Maps a transport error from reqwest onto a provider-tagged error.
    pub fn from_request(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::provider(provider, format!("Request failed: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_constructor() {
        let error = MarketDataError::provider("COINGECKO", "bad payload");
        assert!(matches!(
            error,
            MarketDataError::ProviderError { ref provider, ref message }
                if provider == "COINGECKO" && message == "bad payload"
        ));
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::RateLimited {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Rate limited: YAHOO");

        let error = MarketDataError::provider("COINGECKO", "Invalid JSON");
        assert_eq!(
            format!("{}", error),
            "Provider error: COINGECKO - Invalid JSON"
        );

        let error = MarketDataError::Timeout {
            provider: "YAHOO".to_string(),
        };
        assert_eq!(format!("{}", error), "Timeout: YAHOO");
    }
}
