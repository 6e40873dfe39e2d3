//! Symbol resolution.
//!
//! Maps caller symbols onto asset classes and provider-specific identifiers:
//! - `symbol_tables` - static crypto and commodity lookup tables
//! - `classifier` - partitions a request into disjoint per-class buckets

mod classifier;
mod symbol_tables;

pub use classifier::{classify, ClassifiedSymbols};
pub use symbol_tables::{coingecko_id_for, commodity_ticker_for, COINGECKO_IDS, COMMODITY_TICKERS};
