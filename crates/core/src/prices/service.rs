use async_trait::async_trait;
use futures::join;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

use quotehub_market_data::{classify, AssetClass, FetchOutcome, QuoteProvider, SymbolSpec};

use super::cache::PriceCache;
use super::constants::STALE_AFTER_MINUTES;
use super::model::{CachedPriceSnapshot, PriceRecord, PriceResult};
use super::store::PriceStore;
use crate::clock::{Clock, SystemClock};
use crate::errors::Result;

/// One provider per asset class.
#[derive(Clone)]
pub struct PriceProviders {
    pub equity: Arc<dyn QuoteProvider>,
    pub crypto: Arc<dyn QuoteProvider>,
    pub commodity: Arc<dyn QuoteProvider>,
}

#[async_trait]
pub trait PriceServiceTrait: Send + Sync {
    /// Fetch path: in-process cache, else fan out to every provider and
    /// write the merged result through both cache tiers.
    ///
    /// Provider failures are absorbed; the affected asset class is simply
    /// missing from the result.
    async fn get_prices(&self, symbols: &[SymbolSpec]) -> Result<PriceResult>;

    /// Read path over the durable tier only. Never triggers a fetch.
    fn get_cached_prices(&self, asset_class: Option<AssetClass>) -> Result<CachedPriceSnapshot>;
}

pub struct PriceService {
    providers: PriceProviders,
    store: Arc<dyn PriceStore>,
    cache: PriceCache,
    clock: Arc<dyn Clock>,
}

impl PriceService {
    pub fn new(providers: PriceProviders, store: Arc<dyn PriceStore>) -> Self {
        Self::with_clock(providers, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        providers: PriceProviders,
        store: Arc<dyn PriceStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            providers,
            store,
            cache: PriceCache::new(clock.clone()),
            clock,
        }
    }

    /// Upsert each record independently; returns how many were saved.
    async fn persist(&self, records: &[PriceRecord]) -> usize {
        let mut saved = 0;
        for record in records {
            match self.store.upsert_price(record).await {
                Ok(()) => saved += 1,
                Err(e) => warn!("Failed to save price for {}: {}", record.symbol, e),
            }
        }
        info!("Saved {}/{} prices to database", saved, records.len());
        saved
    }
}

#[async_trait]
impl PriceServiceTrait for PriceService {
    async fn get_prices(&self, symbols: &[SymbolSpec]) -> Result<PriceResult> {
        if let Some(prices) = self.cache.get().await {
            debug!("Serving {} prices from memory cache", prices.len());
            return Ok(PriceResult::from_cache(prices));
        }

        let classified = classify(symbols);
        if classified.is_empty() {
            return Ok(PriceResult {
                prices: HashMap::new(),
                cached: false,
                saved_count: None,
            });
        }

        info!(
            "Fetching prices: {} equities, {} crypto, {} commodities",
            classified.equities.len(),
            classified.crypto.len(),
            classified.commodities.len()
        );

        let (equities, crypto, commodities) = join!(
            self.providers.equity.fetch(&classified.equities),
            self.providers.crypto.fetch(&classified.crypto),
            self.providers.commodity.fetch(&classified.commodities),
        );

        let now = self.clock.now();
        let mut prices = HashMap::new();
        let mut records = Vec::new();

        for (asset_class, outcome) in [
            (AssetClass::Equity, equities),
            (AssetClass::Crypto, crypto),
            (AssetClass::Commodity, commodities),
        ] {
            if let FetchOutcome::Failed { provider, error } = &outcome {
                warn!(
                    "No {} prices this round, {} failed: {}",
                    asset_class, provider, error
                );
            }
            for (symbol, quote) in outcome.into_quotes() {
                records.push(PriceRecord::from_quote(&quote, asset_class, now));
                prices.insert(symbol, quote);
            }
        }

        if prices.is_empty() {
            warn!("No prices returned for {} symbols", classified.len());
            return Ok(PriceResult {
                prices,
                cached: false,
                saved_count: None,
            });
        }

        self.cache.put(prices.clone()).await;
        let saved = self.persist(&records).await;

        Ok(PriceResult {
            prices,
            cached: false,
            saved_count: Some(saved),
        })
    }

    fn get_cached_prices(&self, asset_class: Option<AssetClass>) -> Result<CachedPriceSnapshot> {
        let records = self.store.find_prices(asset_class)?;

        let Some(oldest) = records.iter().map(|r| r.updated_at).min() else {
            return Ok(CachedPriceSnapshot::Empty);
        };

        let cache_age_minutes = (self.clock.now() - oldest).num_minutes().max(0);
        let prices: HashMap<_, _> = records
            .iter()
            .map(|record| (record.symbol.clone(), record.to_quote()))
            .collect();

        Ok(CachedPriceSnapshot::Populated {
            count: prices.len(),
            prices,
            cache_age_minutes,
            is_stale: cache_age_minutes > STALE_AFTER_MINUTES,
        })
    }
}
