use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sentiment::{Sentiment, SentimentLabel};

/// Normalized quote for one symbol.
///
/// `price`, `change` and `change_percent` are always present (zero when the
/// provider gave nothing) so downstream arithmetic never sees a null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Uppercase symbol, identical to the key the quote is stored under
    pub symbol: String,

    /// Display name, falls back to the symbol
    pub name: String,

    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,

    #[serde(default)]
    pub volume: Decimal,

    #[serde(default)]
    pub market_cap: Decimal,

    /// 52-week high (equities, commodities) or all-time high (crypto)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_high: Option<Decimal>,

    /// 52-week low (equities, commodities) or all-time low (crypto)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_low: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_percentage: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment_label: Option<SentimentLabel>,
}

impl Quote {
    /// Create a quote with zeroed numbers and no sentiment.
    pub fn new(symbol: impl Into<String>, name: Option<String>) -> Self {
        let symbol = symbol.into();
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| symbol.clone());
        Self {
            symbol,
            name,
            price: Decimal::ZERO,
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
            volume: Decimal::ZERO,
            market_cap: Decimal::ZERO,
            range_high: None,
            range_low: None,
            sentiment_percentage: None,
            sentiment_label: None,
        }
    }

    /// Attach a computed sentiment; `None` leaves the quote without one.
    pub fn with_sentiment(mut self, sentiment: Option<Sentiment>) -> Self {
        self.sentiment_percentage = sentiment.map(|s| s.percentage);
        self.sentiment_label = sentiment.map(|s| s.label);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_new_defaults() {
        let quote = Quote::new("AAPL", None);
        assert_eq!(quote.name, "AAPL");
        assert_eq!(quote.price, Decimal::ZERO);
        assert_eq!(quote.volume, Decimal::ZERO);
        assert!(quote.sentiment_percentage.is_none());
        assert!(quote.sentiment_label.is_none());
    }

    #[test]
    fn test_blank_name_falls_back_to_symbol() {
        let quote = Quote::new("BTC", Some("  ".to_string()));
        assert_eq!(quote.name, "BTC");
    }

    #[test]
    fn test_serializes_camel_case_numbers() {
        let mut quote = Quote::new("AAPL", Some("Apple Inc.".to_string()))
            .with_sentiment(Some(Sentiment::from_percentage(72)));
        quote.price = dec!(150.25);
        quote.change_percent = dec!(1.5);

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["price"], 150.25);
        assert_eq!(json["changePercent"], 1.5);
        assert_eq!(json["marketCap"], 0.0);
        assert_eq!(json["sentimentPercentage"], 72);
        assert_eq!(json["sentimentLabel"], "Bullish");
        assert!(json.get("rangeHigh").is_none());
    }

    #[test]
    fn test_missing_sentiment_is_omitted() {
        let quote = Quote::new("GOLD", None);
        let json = serde_json::to_value(&quote).unwrap();
        assert!(json.get("sentimentPercentage").is_none());
        assert!(json.get("sentimentLabel").is_none());
    }
}
