//! Yahoo Finance API response models.
//!
//! Only the batched `v7/finance/quote` endpoint is used. Every field is
//! optional because Yahoo omits whatever it does not have for a given
//! instrument (futures have no analyst rating, many ETFs have no market cap).

use serde::Deserialize;

/// Response wrapper for the v7 quote API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteResponse {
    pub quote_response: YahooQuoteResult,
}

#[derive(Debug, Default, Deserialize)]
pub struct YahooQuoteResult {
    #[serde(default)]
    pub result: Vec<YahooQuote>,
    // Note: error field exists in API but failures are handled via HTTP status
}

/// One instrument from the v7 quote API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuote {
    pub symbol: String,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub quote_type: Option<String>,
    pub regular_market_price: Option<f64>,
    pub regular_market_change: Option<f64>,
    pub regular_market_change_percent: Option<f64>,
    pub regular_market_volume: Option<f64>,
    pub market_cap: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    /// e.g. "2.1 - Buy"
    pub average_analyst_rating: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_equity_quote() {
        let json = r#"{
            "quoteResponse": {
                "result": [{
                    "symbol": "AAPL",
                    "shortName": "Apple Inc.",
                    "longName": "Apple Inc.",
                    "quoteType": "EQUITY",
                    "regularMarketPrice": 189.84,
                    "regularMarketChange": 1.25,
                    "regularMarketChangePercent": 0.66,
                    "regularMarketVolume": 52164500,
                    "marketCap": 2950000000000,
                    "fiftyTwoWeekHigh": 199.62,
                    "fiftyTwoWeekLow": 164.08,
                    "averageAnalystRating": "2.0 - Buy"
                }],
                "error": null
            }
        }"#;
        let response: YahooQuoteResponse = serde_json::from_str(json).unwrap();
        let quote = &response.quote_response.result[0];
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.regular_market_price, Some(189.84));
        assert_eq!(quote.regular_market_volume, Some(52164500.0));
        assert_eq!(quote.average_analyst_rating.as_deref(), Some("2.0 - Buy"));
    }

    #[test]
    fn test_deserialize_sparse_future() {
        let json = r#"{
            "quoteResponse": {
                "result": [{
                    "symbol": "GC=F",
                    "shortName": "Gold Dec 24",
                    "quoteType": "FUTURE",
                    "regularMarketPrice": 2650.1
                }]
            }
        }"#;
        let response: YahooQuoteResponse = serde_json::from_str(json).unwrap();
        let quote = &response.quote_response.result[0];
        assert_eq!(quote.quote_type.as_deref(), Some("FUTURE"));
        assert!(quote.long_name.is_none());
        assert!(quote.market_cap.is_none());
        assert!(quote.average_analyst_rating.is_none());
    }

    #[test]
    fn test_deserialize_empty_result() {
        let json = r#"{"quoteResponse": {"result": [], "error": null}}"#;
        let response: YahooQuoteResponse = serde_json::from_str(json).unwrap();
        assert!(response.quote_response.result.is_empty());
    }
}
