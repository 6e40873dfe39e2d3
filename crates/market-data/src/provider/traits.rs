//! Quote provider trait definitions.
//!
//! Every asset class is served by exactly one [`QuoteProvider`]. Providers
//! receive the already-classified, uppercase caller symbols and are
//! responsible for translating them to their own identifiers and back.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{AssetClass, Quote};

/// Result of one batched provider call.
///
/// Callers that only care about data use [`FetchOutcome::into_quotes`];
/// the distinction between "nothing found" and "failed" is kept for logging.
#[derive(Debug)]
pub enum FetchOutcome {
    /// At least one symbol resolved to a quote.
    Quotes(HashMap<String, Quote>),
    /// The provider answered but returned nothing usable, or there was
    /// nothing to ask for.
    NoneFound,
    /// The batch failed as a whole.
    Failed {
        provider: String,
        error: MarketDataError,
    },
}

impl FetchOutcome {
    /// Collapse to the symbol -> quote map; failures become an empty map.
    pub fn into_quotes(self) -> HashMap<String, Quote> {
        match self {
            FetchOutcome::Quotes(quotes) => quotes,
            FetchOutcome::NoneFound | FetchOutcome::Failed { .. } => HashMap::new(),
        }
    }
}

/// A batched quote source for one asset class.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use quotehub_market_data::provider::QuoteProvider;
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl QuoteProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     fn asset_class(&self) -> AssetClass {
///         AssetClass::Equity
///     }
///
///     async fn fetch_quotes(
///         &self,
///         symbols: &[String],
///     ) -> Result<HashMap<String, Quote>, MarketDataError> {
///         Ok(HashMap::new())
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Constant identifier such as "YAHOO" or "COINGECKO", used in logs.
    fn id(&self) -> &'static str;

    /// The asset class this provider serves.
    fn asset_class(&self) -> AssetClass;

    /// Fetch quotes for all `symbols` in one upstream call.
    ///
    /// Keys of the returned map are the caller symbols exactly as given.
    /// Symbols the upstream does not know are simply absent.
    async fn fetch_quotes(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, Quote>, MarketDataError>;

    /// Fetch and classify the outcome. Never fails.
    async fn fetch(&self, symbols: &[String]) -> FetchOutcome {
        if symbols.is_empty() {
            return FetchOutcome::NoneFound;
        }

        debug!(
            "Fetching {} {} quote(s) from {}",
            symbols.len(),
            self.asset_class(),
            self.id()
        );

        match self.fetch_quotes(symbols).await {
            Ok(quotes) if quotes.is_empty() => {
                debug!("{} returned no quotes for {:?}", self.id(), symbols);
                FetchOutcome::NoneFound
            }
            Ok(quotes) => FetchOutcome::Quotes(quotes),
            Err(error) => {
                warn!(
                    "{} batch for {} symbol(s) failed: {}",
                    self.id(),
                    symbols.len(),
                    error
                );
                FetchOutcome::Failed {
                    provider: self.id().to_string(),
                    error,
                }
            }
        }
    }
}
