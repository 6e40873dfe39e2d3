//! Quote provider abstraction and implementations.
//!
//! - [`QuoteProvider`] is the trait every upstream source implements
//! - [`FetchOutcome`] separates "nothing found" from "failed"
//! - `yahoo` serves equities and commodity futures
//! - `coingecko` serves crypto
//!
//! Providers receive already-classified symbols. Translation to upstream
//! identifiers (coin ids, futures tickers) happens inside each provider so
//! that the returned map is always keyed by the caller's symbol.

mod traits;

pub mod coingecko;
pub mod yahoo;

use std::time::Duration;

use reqwest::Client;

use crate::errors::MarketDataError;

pub use traits::{FetchOutcome, QuoteProvider};

/// Default upstream request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Build the HTTP client shared by a provider's requests.
pub(crate) fn build_client(provider: &str, timeout: Duration) -> Result<Client, MarketDataError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| MarketDataError::provider(provider, format!("Failed to build client: {}", e)))
}

/// Map a non-success HTTP status onto a provider error.
pub(crate) fn status_error(provider: &str, status: reqwest::StatusCode) -> MarketDataError {
    match status.as_u16() {
        429 => MarketDataError::RateLimited {
            provider: provider.to_string(),
        },
        401 | 403 => MarketDataError::Unauthorized {
            provider: provider.to_string(),
        },
        _ => MarketDataError::provider(provider, format!("HTTP {}", status)),
    }
}
