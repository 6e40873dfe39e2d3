use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Asset classification used for routing a symbol to a provider.
///
/// On the wire these are `STOCK`, `CRYPTO` and `COMMODITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AssetClass {
    #[default]
    #[serde(rename = "STOCK")]
    Equity,
    #[serde(rename = "CRYPTO")]
    Crypto,
    #[serde(rename = "COMMODITY")]
    Commodity,
}

impl AssetClass {
    pub const ALL: [AssetClass; 3] = [AssetClass::Equity, AssetClass::Crypto, AssetClass::Commodity];

    /// Storage/wire tag for this class.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "STOCK",
            AssetClass::Crypto => "CRYPTO",
            AssetClass::Commodity => "COMMODITY",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STOCK" => Ok(AssetClass::Equity),
            "CRYPTO" => Ok(AssetClass::Crypto),
            "COMMODITY" => Ok(AssetClass::Commodity),
            other => Err(format!("Unknown asset type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&AssetClass::Equity).unwrap(),
            "\"STOCK\""
        );
        assert_eq!(
            serde_json::from_str::<AssetClass>("\"COMMODITY\"").unwrap(),
            AssetClass::Commodity
        );
        assert!(serde_json::from_str::<AssetClass>("\"FOREX\"").is_err());
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("crypto".parse::<AssetClass>(), Ok(AssetClass::Crypto));
        assert_eq!(" Stock ".parse::<AssetClass>(), Ok(AssetClass::Equity));
        assert!("bond".parse::<AssetClass>().is_err());
    }

    #[test]
    fn test_as_str_round_trips() {
        for class in AssetClass::ALL {
            assert_eq!(class.as_str().parse::<AssetClass>(), Ok(class));
        }
    }
}
