//! Price aggregation module.
//!
//! - [`model`] - Durable rows and service results
//! - [`cache`] - In-process TTL slot
//! - [`store`] - Storage trait for the durable tier
//! - [`service`] - The aggregator facade
//! - [`constants`] - TTL and staleness thresholds
//!
//! ```text
//! PriceService ─┬─> PriceCache (memory, 5 min)
//!               ├─> QuoteProvider x3 (market-data crate)
//!               └─> PriceStore (DB, stale after 10 min)
//! ```

pub mod cache;
pub mod constants;
pub mod model;
pub mod service;
pub mod store;


pub use cache::PriceCache;
pub use constants::{CACHE_TTL_MINUTES, STALE_AFTER_MINUTES};
pub use model::{CachedPriceSnapshot, PriceRecord, PriceResult};
pub use service::{PriceProviders, PriceService, PriceServiceTrait};
pub use store::PriceStore;
