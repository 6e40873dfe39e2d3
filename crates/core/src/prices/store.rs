//! Durable price storage trait.
//!
//! Implemented by the `storage-sqlite` crate. Mutations are async because they
//! go through the single-writer actor; reads are sync pool queries.

use async_trait::async_trait;
use quotehub_market_data::AssetClass;

use super::model::PriceRecord;
use crate::errors::Result;

#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Insert or replace the row for `record.symbol`.
    async fn upsert_price(&self, record: &PriceRecord) -> Result<()>;

    /// All rows, optionally restricted to one asset class.
    fn find_prices(&self, asset_class: Option<AssetClass>) -> Result<Vec<PriceRecord>>;
}
