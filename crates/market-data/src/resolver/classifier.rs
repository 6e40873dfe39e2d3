use std::collections::HashSet;

use crate::models::{AssetClass, SymbolSpec};

use super::symbol_tables::{coingecko_id_for, commodity_ticker_for};

/// A request split into three disjoint, order-preserving buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedSymbols {
    pub equities: Vec<String>,
    pub crypto: Vec<String>,
    pub commodities: Vec<String>,
}

impl ClassifiedSymbols {
    pub fn len(&self) -> usize {
        self.equities.len() + self.crypto.len() + self.commodities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, asset_class: AssetClass, symbol: String) {
        match asset_class {
            AssetClass::Equity => self.equities.push(symbol),
            AssetClass::Crypto => self.crypto.push(symbol),
            AssetClass::Commodity => self.commodities.push(symbol),
        }
    }
}

/// Infer the asset class of an uppercase symbol from the lookup tables.
pub fn infer_asset_class(symbol: &str) -> AssetClass {
    if coingecko_id_for(symbol).is_some() {
        AssetClass::Crypto
    } else if commodity_ticker_for(symbol).is_some() {
        AssetClass::Commodity
    } else {
        AssetClass::Equity
    }
}

/// Partition requested symbols by asset class.
///
/// An explicit type hint always wins over table membership. Unknown symbols
/// default to equity. Blank symbols are dropped and repeated symbols are kept
/// once, in the bucket chosen by their first occurrence.
pub fn classify(specs: &[SymbolSpec]) -> ClassifiedSymbols {
    let mut seen = HashSet::new();
    let mut classified = ClassifiedSymbols::default();

    for spec in specs {
        let symbol = spec.symbol();
        if symbol.is_empty() || !seen.insert(symbol.clone()) {
            continue;
        }
        let asset_class = spec
            .asset_class()
            .unwrap_or_else(|| infer_asset_class(&symbol));
        classified.push(asset_class, symbol);
    }

    classified
}
