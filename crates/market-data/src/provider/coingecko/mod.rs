//! CoinGecko crypto provider.
//!
//! Uses `coins/markets`, which returns price, 24h change, volume, market cap
//! and all-time high/low for many coins in one call.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use num_traits::FromPrimitive;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{AssetClass, Quote};
use crate::provider::{build_client, status_error, QuoteProvider, DEFAULT_TIMEOUT};
use crate::resolver::coingecko_id_for;
use crate::sentiment::{self, RatingSignal, SentimentInputs};

const PROVIDER_ID: &str = "COINGECKO";

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// One coin from the `coins/markets` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub total_volume: Option<f64>,
    pub market_cap: Option<f64>,
    pub ath: Option<f64>,
    pub atl: Option<f64>,
    /// Only served by `coins/{id}`; `coins/markets` normally omits it, so
    /// crypto sentiment usually comes from the all-time range instead.
    pub sentiment_votes_up_percentage: Option<f64>,
}

pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    pub fn new(api_key: Option<String>) -> Result<Self, MarketDataError> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, MarketDataError> {
        Ok(Self {
            client: build_client(PROVIDER_ID, timeout)?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_markets(&self, ids: &[String]) -> Result<Vec<CoinMarket>, MarketDataError> {
        let url = format!("{}/coins/markets", self.base_url);
        let ids = ids.join(",");

        let mut request = self.client.get(&url).query(&[
            ("vs_currency", "usd"),
            ("ids", ids.as_str()),
            ("price_change_percentage", "24h"),
        ]);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MarketDataError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error(PROVIDER_ID, status));
        }

        response.json().await.map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to parse markets response: {}", e))
        })
    }
}

#[async_trait]
impl QuoteProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn asset_class(&self) -> AssetClass {
        AssetClass::Crypto
    }

    async fn fetch_quotes(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, Quote>, MarketDataError> {
        let (ids, by_id) = coin_ids(symbols);
        let markets = self.fetch_markets(&ids).await?;
        Ok(map_markets(&by_id, markets))
    }
}

/// Unique coin ids plus the id -> symbols reverse map.
///
/// Symbols outside the table use their lowercase form as the id. Several
/// symbols may share an id (BTC and an explicitly typed BITCOIN).
fn coin_ids(symbols: &[String]) -> (Vec<String>, HashMap<String, Vec<String>>) {
    let mut ids = Vec::with_capacity(symbols.len());
    let mut by_id: HashMap<String, Vec<String>> = HashMap::with_capacity(symbols.len());

    for symbol in symbols {
        let id = coingecko_id_for(symbol)
            .map(str::to_string)
            .unwrap_or_else(|| symbol.to_lowercase());
        let entry = by_id.entry(id.clone()).or_default();
        if entry.is_empty() {
            ids.push(id);
        }
        entry.push(symbol.clone());
    }

    (ids, by_id)
}

fn map_markets(
    by_id: &HashMap<String, Vec<String>>,
    markets: Vec<CoinMarket>,
) -> HashMap<String, Quote> {
    let mut quotes = HashMap::new();

    for market in markets {
        let Some(symbols) = by_id.get(&market.id) else {
            warn!("CoinGecko returned unrequested coin {}", market.id);
            continue;
        };
        for symbol in symbols {
            match normalize_market(symbol, &market) {
                Some(quote) => {
                    quotes.insert(symbol.clone(), quote);
                }
                None => debug!("Dropping {} ({}): no usable price", symbol, market.id),
            }
        }
    }

    quotes
}

fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

/// A coin without a positive current price yields no quote at all.
fn normalize_market(symbol: &str, market: &CoinMarket) -> Option<Quote> {
    let price = to_decimal(market.current_price).filter(|p| !p.is_zero())?;
    let change_percent = to_decimal(market.price_change_percentage_24h);

    let mut quote = Quote::new(symbol, market.name.clone());
    quote.price = price;
    quote.change = to_decimal(market.price_change_24h).unwrap_or_default();
    quote.change_percent = change_percent.unwrap_or_default();
    quote.volume = to_decimal(market.total_volume).unwrap_or_default();
    quote.market_cap = to_decimal(market.market_cap).unwrap_or_default();
    quote.range_high = to_decimal(market.ath);
    quote.range_low = to_decimal(market.atl);

    let inputs = SentimentInputs {
        rating: to_decimal(market.sentiment_votes_up_percentage).map(RatingSignal::VotePercentage),
        price,
        range_high: quote.range_high,
        range_low: quote.range_low,
        change_percent,
    };
    Some(quote.with_sentiment(sentiment::evaluate(&inputs)))
}
