//! Durable price cache backed by the `price_cache` table.

mod model;
mod repository;

pub use model::PriceCacheDB;
pub use repository::PriceRepository;
