//! Database model for cached prices.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::StorageError;
use quotehub_core::prices::PriceRecord;
use quotehub_market_data::AssetClass;

/// One row per symbol; decimals and timestamps are stored as TEXT.
#[derive(Queryable, Identifiable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::price_cache)]
#[diesel(primary_key(symbol))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PriceCacheDB {
    pub symbol: String,
    pub name: String,
    pub asset_class: String,
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub volume: Option<String>,
    pub market_cap: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub updated_at: String,
}

impl From<&PriceRecord> for PriceCacheDB {
    fn from(record: &PriceRecord) -> Self {
        PriceCacheDB {
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            asset_class: record.asset_class.as_str().to_string(),
            price: record.price.to_string(),
            change: record.change.to_string(),
            change_percent: record.change_percent.to_string(),
            volume: record.volume.map(|v| v.to_string()),
            market_cap: record.market_cap.map(|v| v.to_string()),
            high: record.high.map(|v| v.to_string()),
            low: record.low.map(|v| v.to_string()),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

fn parse_decimal(column: &str, value: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value)
        .map_err(|e| StorageError::InvalidData(format!("{} '{}': {}", column, value, e)))
}

fn parse_optional(column: &str, value: Option<&str>) -> Result<Option<Decimal>, StorageError> {
    value.map(|v| parse_decimal(column, v)).transpose()
}

impl TryFrom<PriceCacheDB> for PriceRecord {
    type Error = StorageError;

    fn try_from(db: PriceCacheDB) -> Result<Self, Self::Error> {
        let asset_class = AssetClass::from_str(&db.asset_class).map_err(StorageError::InvalidData)?;
        let updated_at = DateTime::parse_from_rfc3339(&db.updated_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                StorageError::InvalidData(format!("updated_at '{}': {}", db.updated_at, e))
            })?;

        Ok(PriceRecord {
            price: parse_decimal("price", &db.price)?,
            change: parse_decimal("change", &db.change)?,
            change_percent: parse_decimal("change_percent", &db.change_percent)?,
            volume: parse_optional("volume", db.volume.as_deref())?,
            market_cap: parse_optional("market_cap", db.market_cap.as_deref())?,
            high: parse_optional("high", db.high.as_deref())?,
            low: parse_optional("low", db.low.as_deref())?,
            symbol: db.symbol,
            name: db.name,
            asset_class,
            updated_at,
        })
    }
}
