//! QuoteHub Market Data Crate
//!
//! This crate provides provider-agnostic quote fetching for the three asset
//! classes the price service understands: equities, crypto and commodities.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  SymbolSpec[]    |  (caller input: "AAPL" or {symbol, type})
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Resolver      |  (static tables, explicit type hints)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (Yahoo equities, CoinGecko, Yahoo futures)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |     Quote        |  (normalized record + sentiment)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Normalized quote with sentiment
//! - [`AssetClass`] - STOCK / CRYPTO / COMMODITY
//! - [`SymbolSpec`] - A requested symbol with an optional type hint
//! - [`ClassifiedSymbols`] - Disjoint per-class partition of a request
//! - [`QuoteProvider`] - Batched quote source for one asset class
//! - [`FetchOutcome`] - Provider result distinguishing "none found" from "failed"

pub mod errors;
pub mod models;
pub mod provider;
pub mod resolver;
pub mod sentiment;

pub use models::{AssetClass, Quote, SymbolSpec};

pub use resolver::{
    classify, coingecko_id_for, commodity_ticker_for, ClassifiedSymbols, COINGECKO_IDS,
    COMMODITY_TICKERS,
};

pub use sentiment::{Sentiment, SentimentInputs, SentimentLabel};

pub use provider::coingecko::CoinGeckoProvider;
pub use provider::yahoo::{YahooClient, YahooCommodityProvider, YahooEquityProvider};
pub use provider::{FetchOutcome, QuoteProvider};
