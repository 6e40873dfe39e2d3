use serde::{Deserialize, Serialize};

use super::asset_class::AssetClass;

/// A requested symbol: either a bare string or `{symbol, type?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymbolSpec {
    Bare(String),
    Tagged {
        symbol: String,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        asset_class: Option<AssetClass>,
    },
}

impl SymbolSpec {
    /// Uppercased, trimmed symbol.
    pub fn symbol(&self) -> String {
        match self {
            SymbolSpec::Bare(symbol) | SymbolSpec::Tagged { symbol, .. } => {
                symbol.trim().to_uppercase()
            }
        }
    }

    /// Explicit type hint, if any.
    pub fn asset_class(&self) -> Option<AssetClass> {
        match self {
            SymbolSpec::Bare(_) => None,
            SymbolSpec::Tagged { asset_class, .. } => *asset_class,
        }
    }
}

impl From<&str> for SymbolSpec {
    fn from(symbol: &str) -> Self {
        SymbolSpec::Bare(symbol.to_string())
    }
}
