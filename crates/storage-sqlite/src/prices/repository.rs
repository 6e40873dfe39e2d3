use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use super::model::PriceCacheDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::price_cache::dsl as price_cache_dsl;
use quotehub_core::prices::{PriceRecord, PriceStore};
use quotehub_core::Result;
use quotehub_market_data::AssetClass;

pub struct PriceRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PriceRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PriceStore for PriceRepository {
    async fn upsert_price(&self, record: &PriceRecord) -> Result<()> {
        let db_row = PriceCacheDB::from(record);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(price_cache_dsl::price_cache)
                    .values(&db_row)
                    .execute(conn)
                    .map_err(StorageError::QueryFailed)?;
                Ok(())
            })
            .await
    }

    fn find_prices(&self, asset_class: Option<AssetClass>) -> Result<Vec<PriceRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = price_cache_dsl::price_cache
            .select(PriceCacheDB::as_select())
            .order(price_cache_dsl::symbol.asc())
            .into_boxed();
        if let Some(asset_class) = asset_class {
            query = query.filter(price_cache_dsl::asset_class.eq(asset_class.as_str()));
        }

        let rows = query.load::<PriceCacheDB>(&mut conn).into_core()?;
        debug!("Loaded {} cached price rows", rows.len());

        rows.into_iter()
            .map(|row| PriceRecord::try_from(row).map_err(Into::into))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::{Duration, TimeZone, Utc};
    use quotehub_core::errors::{DatabaseError, Error};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    async fn create_test_repository() -> (PriceRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (PriceRepository::new(Arc::clone(&pool), writer), temp_dir)
    }

    fn record(symbol: &str, asset_class: AssetClass, price: Decimal) -> PriceRecord {
        PriceRecord {
            symbol: symbol.to_string(),
            name: format!("{} name", symbol),
            asset_class,
            price,
            change: dec!(-1.25),
            change_percent: dec!(-0.5),
            volume: Some(dec!(1000)),
            market_cap: None,
            high: Some(dec!(300.123456)),
            low: None,
            updated_at: Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_find_round_trip() {
        let (repo, _dir) = create_test_repository().await;
        let original = record("AAPL", AssetClass::Equity, dec!(190.12));

        repo.upsert_price(&original).await.unwrap();
        let rows = repo.find_prices(None).unwrap();

        assert_eq!(rows, vec![original]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_symbol() {
        let (repo, _dir) = create_test_repository().await;
        repo.upsert_price(&record("BTC", AssetClass::Crypto, dec!(60000)))
            .await
            .unwrap();

        let mut newer = record("BTC", AssetClass::Crypto, dec!(67000.5));
        newer.updated_at += Duration::minutes(3);
        repo.upsert_price(&newer).await.unwrap();

        let rows = repo.find_prices(None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, dec!(67000.5));
        assert_eq!(rows[0].updated_at, newer.updated_at);
    }

    #[tokio::test]
    async fn test_find_filters_by_asset_class() {
        let (repo, _dir) = create_test_repository().await;
        for r in [
            record("AAPL", AssetClass::Equity, dec!(190)),
            record("BTC", AssetClass::Crypto, dec!(67000)),
            record("ETH", AssetClass::Crypto, dec!(3500)),
            record("GOLD", AssetClass::Commodity, dec!(2650)),
        ] {
            repo.upsert_price(&r).await.unwrap();
        }

        let crypto = repo.find_prices(Some(AssetClass::Crypto)).unwrap();
        let symbols: Vec<_> = crypto.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BTC", "ETH"]);

        assert_eq!(repo.find_prices(None).unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let (repo, _dir) = create_test_repository().await;
        assert!(repo.find_prices(None).unwrap().is_empty());
        assert!(repo
            .find_prices(Some(AssetClass::Commodity))
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_row_is_an_error() {
        let (repo, _dir) = create_test_repository().await;
        let mut row = PriceCacheDB::from(&record("AAPL", AssetClass::Equity, dec!(1)));
        row.price = "not-a-number".to_string();

        repo.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(price_cache_dsl::price_cache)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::QueryFailed)?;
                Ok(())
            })
            .await
            .unwrap();

        let err = repo.find_prices(None).unwrap_err();
        assert!(matches!(err, Error::Database(DatabaseError::Internal(_))));
    }
}
