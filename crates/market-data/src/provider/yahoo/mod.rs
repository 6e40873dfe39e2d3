//! Yahoo Finance market data provider.
//!
//! One [`YahooClient`] backs two providers:
//! - [`YahooEquityProvider`] for stocks and ETFs (e.g., AAPL, SHOP.TO)
//! - [`YahooCommodityProvider`] for front-month futures (e.g., GOLD -> GC=F)
//!
//! Both use the batched `v7/finance/quote` endpoint, so a whole asset class
//! is served by a single request.

mod models;

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use num_traits::FromPrimitive;
use reqwest::{header, Client, StatusCode};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{AssetClass, Quote};
use crate::provider::{build_client, status_error, QuoteProvider, DEFAULT_TIMEOUT};
use crate::resolver::commodity_ticker_for;
use crate::sentiment::{self, RatingSignal, SentimentInputs};

pub use models::{YahooQuote, YahooQuoteResponse};

const PROVIDER_ID: &str = "YAHOO";

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const COOKIE_URL: &str = "https://fc.yahoo.com";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

fn cached_crumb() -> Option<CrumbData> {
    YAHOO_CRUMB.read().ok().and_then(|guard| guard.clone())
}

fn store_crumb(crumb: Option<CrumbData>) {
    if let Ok(mut guard) = YAHOO_CRUMB.write() {
        *guard = crumb;
    }
}

// ============================================================================
// Client
// ============================================================================

/// Thin HTTP client for the Yahoo quote endpoint.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, MarketDataError> {
        Ok(Self {
            client: build_client(PROVIDER_ID, timeout)?,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = cached_crumb() {
            return Ok(crumb);
        }
        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get(COOKIE_URL)
            .send()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::provider(PROVIDER_ID, "Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| MarketDataError::provider(PROVIDER_ID, format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };
        store_crumb(Some(crumb_data.clone()));

        Ok(crumb_data)
    }

    /// Fetch raw quotes for a batch of Yahoo tickers.
    ///
    /// The crumb handshake is best effort: when it fails the request goes out
    /// unauthenticated and Yahoo decides.
    pub async fn fetch_batch(&self, tickers: &[String]) -> Result<Vec<YahooQuote>, MarketDataError> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }

        let crumb = match self.ensure_crumb().await {
            Ok(crumb) => Some(crumb),
            Err(e) => {
                debug!("Yahoo crumb unavailable, continuing without: {}", e);
                None
            }
        };

        let mut url = format!(
            "{}/v7/finance/quote?symbols={}",
            self.base_url,
            encode(&tickers.join(","))
        );
        if let Some(crumb) = &crumb {
            url.push_str("&crumb=");
            url.push_str(&encode(&crumb.crumb));
        }

        let mut request = self.client.get(&url);
        if let Some(crumb) = &crumb {
            request = request.header(header::COOKIE, &crumb.cookie);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MarketDataError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            store_crumb(None);
            return Err(MarketDataError::Unauthorized {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(status_error(PROVIDER_ID, status));
        }

        let data: YahooQuoteResponse = response.json().await.map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to parse quote response: {}", e))
        })?;

        Ok(data.quote_response.result)
    }
}

// ============================================================================
// Equity Provider
// ============================================================================

/// Stocks and ETFs, queried by their own ticker.
pub struct YahooEquityProvider {
    client: Arc<YahooClient>,
}

impl YahooEquityProvider {
    pub fn new(client: Arc<YahooClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuoteProvider for YahooEquityProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn asset_class(&self) -> AssetClass {
        AssetClass::Equity
    }

    async fn fetch_quotes(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, Quote>, MarketDataError> {
        let raw = self.client.fetch_batch(symbols).await?;
        Ok(map_equity_quotes(symbols, raw))
    }
}

/// Keep only requested symbols, keyed by the caller's spelling.
fn map_equity_quotes(symbols: &[String], raw: Vec<YahooQuote>) -> HashMap<String, Quote> {
    let requested: HashSet<&str> = symbols.iter().map(String::as_str).collect();

    raw.into_iter()
        .filter_map(|item| {
            let symbol = item.symbol.to_uppercase();
            if !requested.contains(symbol.as_str()) {
                debug!("Ignoring unrequested Yahoo symbol {}", item.symbol);
                return None;
            }
            let rating = item
                .average_analyst_rating
                .as_deref()
                .and_then(parse_analyst_rating)
                .map(RatingSignal::AnalystRating);
            Some((symbol.clone(), normalize_quote(&symbol, &item, rating)))
        })
        .collect()
}

// ============================================================================
// Commodity Provider
// ============================================================================

/// Commodities, queried through their front-month futures ticker.
pub struct YahooCommodityProvider {
    client: Arc<YahooClient>,
}

impl YahooCommodityProvider {
    pub fn new(client: Arc<YahooClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl QuoteProvider for YahooCommodityProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn asset_class(&self) -> AssetClass {
        AssetClass::Commodity
    }

    async fn fetch_quotes(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, Quote>, MarketDataError> {
        let (tickers, by_ticker) = commodity_tickers(symbols);
        let raw = self.client.fetch_batch(&tickers).await?;
        Ok(map_commodity_quotes(&by_ticker, raw))
    }
}

/// Translate commodity symbols to unique futures tickers plus the reverse map.
///
/// Symbols missing from the table are passed through unchanged. Several
/// symbols may share a ticker (OIL and CRUDE).
fn commodity_tickers(symbols: &[String]) -> (Vec<String>, HashMap<String, Vec<String>>) {
    let mut tickers = Vec::new();
    let mut by_ticker: HashMap<String, Vec<String>> = HashMap::new();

    for symbol in symbols {
        let ticker = commodity_ticker_for(symbol)
            .map(str::to_string)
            .unwrap_or_else(|| symbol.clone());
        let entry = by_ticker.entry(ticker.clone()).or_default();
        if entry.is_empty() {
            tickers.push(ticker);
        }
        entry.push(symbol.clone());
    }

    (tickers, by_ticker)
}

fn map_commodity_quotes(
    by_ticker: &HashMap<String, Vec<String>>,
    raw: Vec<YahooQuote>,
) -> HashMap<String, Quote> {
    let mut quotes = HashMap::new();

    for item in raw {
        let Some(symbols) = by_ticker.get(&item.symbol.to_uppercase()) else {
            warn!("Yahoo returned unmapped futures ticker {}", item.symbol);
            continue;
        };
        for symbol in symbols {
            quotes.insert(symbol.clone(), normalize_quote(symbol, &item, None));
        }
    }

    quotes
}

// ============================================================================
// Helper Functions
// ============================================================================

fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

/// Build the common quote record for `symbol` from a raw Yahoo row.
fn normalize_quote(symbol: &str, raw: &YahooQuote, rating: Option<RatingSignal>) -> Quote {
    let name = format_name(
        raw.long_name.as_deref(),
        raw.quote_type.as_deref().unwrap_or(""),
        raw.short_name.as_deref(),
        symbol,
    );

    let mut quote = Quote::new(symbol, Some(name));
    quote.price = to_decimal(raw.regular_market_price).unwrap_or_default();
    quote.change = to_decimal(raw.regular_market_change).unwrap_or_default();
    quote.change_percent = to_decimal(raw.regular_market_change_percent).unwrap_or_default();
    quote.volume = to_decimal(raw.regular_market_volume).unwrap_or_default();
    quote.market_cap = to_decimal(raw.market_cap).unwrap_or_default();
    quote.range_high = to_decimal(raw.fifty_two_week_high);
    quote.range_low = to_decimal(raw.fifty_two_week_low);

    let inputs = SentimentInputs {
        rating,
        price: quote.price,
        range_high: quote.range_high,
        range_low: quote.range_low,
        change_percent: to_decimal(raw.regular_market_change_percent),
    };
    quote.with_sentiment(sentiment::evaluate(&inputs))
}

/// Parse "2.1 - Buy" into 2.1. Ratings outside 1..=5 are ignored.
fn parse_analyst_rating(value: &str) -> Option<Decimal> {
    let score = value.split(" - ").next()?.trim();
    let rating = Decimal::from_str(score).ok()?;
    (Decimal::ONE..=Decimal::from(5))
        .contains(&rating)
        .then_some(rating)
}

const CONTRACT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// "Gold Dec 24" -> "Gold". `None` unless the name ends in `Mon YY`.
fn strip_contract_month(name: &str) -> Option<&str> {
    let mut parts = name.trim_end().rsplitn(3, ' ');
    let year = parts.next()?;
    let month = parts.next()?;
    let base = parts.next()?.trim_end();

    let is_year = year.len() == 2 && year.bytes().all(|b| b.is_ascii_digit());
    (is_year && CONTRACT_MONTHS.contains(&month) && !base.is_empty()).then_some(base)
}

/// Clean up fund names by removing common prefixes.
fn format_name(
    long_name: Option<&str>,
    quote_type: &str,
    short_name: Option<&str>,
    symbol: &str,
) -> String {
    let mut name = long_name.unwrap_or("").to_string();

    if !name.is_empty() {
        let replacements = [
            ("&amp;", "&"),
            ("Amundi Index Solutions - ", ""),
            ("iShares ETF (CH) - ", ""),
            ("iShares III Public Limited Company - ", ""),
            ("iShares V PLC - ", ""),
            ("iShares VII PLC - ", ""),
            ("Vanguard Funds Public Limited Company - ", ""),
            ("Vanguard Index Funds - ", ""),
            ("Xtrackers (IE) Plc - ", ""),
        ];

        for (from, to) in &replacements {
            name = name.replace(from, to);
        }
    }

    if quote_type.eq_ignore_ascii_case("FUTURE") {
        if let Some(base) = short_name.and_then(strip_contract_month) {
            return base.to_string();
        }
    }

    if name.is_empty() {
        short_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(symbol)
            .to_string()
    } else {
        name
    }
}

// ============================================================================
// Tests
// ============================================================================
