//! In-process price cache.
//!
//! A single slot holding the last merged mapping. Every fresh aggregation
//! overwrites it regardless of which symbols were requested; entries are
//! never evicted, only replaced.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::debug;
use quotehub_market_data::Quote;
use tokio::sync::RwLock;

use super::constants::CACHE_TTL_MINUTES;
use crate::clock::Clock;

struct CacheEntry {
    prices: HashMap<String, Quote>,
    cached_at: DateTime<Utc>,
}

pub struct PriceCache {
    slot: RwLock<Option<CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl PriceCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            clock,
            ttl: Duration::minutes(CACHE_TTL_MINUTES),
        }
    }

    /// The cached mapping, if one exists and is younger than the TTL.
    pub async fn get(&self) -> Option<HashMap<String, Quote>> {
        let now = self.clock.now();
        let slot = self.slot.read().await;
        let entry = slot.as_ref()?;

        if now - entry.cached_at < self.ttl {
            debug!(
                "Price cache hit ({} symbols, {}s old)",
                entry.prices.len(),
                (now - entry.cached_at).num_seconds()
            );
            Some(entry.prices.clone())
        } else {
            debug!("Price cache expired");
            None
        }
    }

    /// Replace the slot. Last writer wins.
    pub async fn put(&self, prices: HashMap<String, Quote>) {
        let cached_at = self.clock.now();
        *self.slot.write().await = Some(CacheEntry { prices, cached_at });
    }
}
