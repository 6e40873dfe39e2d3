//! Domain models for aggregated prices.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use quotehub_market_data::sentiment::sentiment_for_change;
use quotehub_market_data::{AssetClass, Quote};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One durable row per symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub symbol: String,
    pub name: String,
    pub asset_class: AssetClass,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub volume: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}

impl PriceRecord {
    pub fn from_quote(quote: &Quote, asset_class: AssetClass, updated_at: DateTime<Utc>) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            asset_class,
            price: quote.price,
            change: quote.change,
            change_percent: quote.change_percent,
            volume: Some(quote.volume),
            market_cap: Some(quote.market_cap),
            high: quote.range_high,
            low: quote.range_low,
            updated_at,
        }
    }

    /// Rebuild a quote from a stored row.
    ///
    /// Stored rows carry no rating, so sentiment always comes from the
    /// change percent alone.
    pub fn to_quote(&self) -> Quote {
        let mut quote = Quote::new(self.symbol.clone(), Some(self.name.clone()));
        quote.price = self.price;
        quote.change = self.change;
        quote.change_percent = self.change_percent;
        quote.volume = self.volume.unwrap_or_default();
        quote.market_cap = self.market_cap.unwrap_or_default();
        quote.range_high = self.high;
        quote.range_low = self.low;
        quote.with_sentiment(Some(sentiment_for_change(self.change_percent)))
    }
}

/// Result of the fetch path.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceResult {
    pub prices: HashMap<String, Quote>,
    pub cached: bool,
    /// Rows written to the durable tier; `None` when nothing was written.
    pub saved_count: Option<usize>,
}

impl PriceResult {
    pub fn from_cache(prices: HashMap<String, Quote>) -> Self {
        Self {
            prices,
            cached: true,
            saved_count: None,
        }
    }

    pub fn saved_to_database(&self) -> Option<bool> {
        self.saved_count.map(|count| count > 0)
    }
}

/// Result of the durable read path.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedPriceSnapshot {
    Empty,
    Populated {
        prices: HashMap<String, Quote>,
        /// Age of the oldest row, whole minutes rounded down.
        cache_age_minutes: i64,
        is_stale: bool,
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quotehub_market_data::SentimentLabel;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_round_trip_synthesizes_change_sentiment() {
        let mut quote = Quote::new("AAPL", Some("Apple Inc.".to_string()));
        quote.price = dec!(190.5);
        quote.change = dec!(1.5);
        quote.change_percent = dec!(4);
        quote.range_high = Some(dec!(200));
        quote.sentiment_percentage = Some(10);

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let record = PriceRecord::from_quote(&quote, AssetClass::Equity, at);
        assert_eq!(record.volume, Some(Decimal::ZERO));
        assert_eq!(record.high, Some(dec!(200)));
        assert_eq!(record.low, None);

        let restored = record.to_quote();
        assert_eq!(restored.price, dec!(190.5));
        assert_eq!(restored.change_percent, dec!(4));
        // 50 + 4 * 5, not the provider's original value
        assert_eq!(restored.sentiment_percentage, Some(70));
        assert_eq!(restored.sentiment_label, Some(SentimentLabel::Bullish));
    }

    #[test]
    fn test_saved_to_database_flag() {
        let mut result = PriceResult::from_cache(HashMap::new());
        assert_eq!(result.saved_to_database(), None);

        result.saved_count = Some(0);
        assert_eq!(result.saved_to_database(), Some(false));

        result.saved_count = Some(3);
        assert_eq!(result.saved_to_database(), Some(true));
    }
}
