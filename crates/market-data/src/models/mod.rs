//! Market data models
//!
//! - `asset_class` - The three asset classes a symbol can belong to
//! - `quote` - The normalized quote record (Quote)
//! - `symbol_spec` - Requested symbols with optional type hints (SymbolSpec)

mod asset_class;
mod quote;
mod symbol_spec;

pub use asset_class::AssetClass;
pub use quote::Quote;
pub use symbol_spec::SymbolSpec;
