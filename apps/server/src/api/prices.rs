use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use quotehub_core::prices::CachedPriceSnapshot;
use quotehub_market_data::{AssetClass, Quote, SymbolSpec};

const EMPTY_STORE_MESSAGE: &str = "No cached prices found";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkPricesResponse {
    prices: HashMap<String, Quote>,
    cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_to_database: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CachedPricesResponse {
    prices: HashMap<String, Quote>,
    cached: bool,
    from_database: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_age_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_stale: Option<bool>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<CachedPriceSnapshot> for CachedPricesResponse {
    fn from(snapshot: CachedPriceSnapshot) -> Self {
        match snapshot {
            CachedPriceSnapshot::Empty => CachedPricesResponse {
                prices: HashMap::new(),
                cached: false,
                from_database: true,
                cache_age_minutes: None,
                is_stale: None,
                count: 0,
                message: Some(EMPTY_STORE_MESSAGE.to_string()),
            },
            CachedPriceSnapshot::Populated {
                prices,
                cache_age_minutes,
                is_stale,
                count,
            } => CachedPricesResponse {
                prices,
                cached: true,
                from_database: true,
                cache_age_minutes: Some(cache_age_minutes),
                is_stale: Some(is_stale),
                count,
                message: None,
            },
        }
    }
}

#[derive(Deserialize)]
struct CachedPricesQuery {
    #[serde(rename = "type")]
    asset_type: Option<String>,
}

/// Pull the symbol list out of a request body.
///
/// The body is taken as raw JSON so that every shape problem maps to a
/// 400 with an `{error}` body rather than axum's default rejection.
fn parse_symbols(body: &Value) -> Result<Vec<SymbolSpec>, ApiError> {
    let items = body
        .get("symbols")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::BadRequest("Symbols array is required".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<SymbolSpec>(item.clone()).map_err(|_| {
                ApiError::BadRequest(format!("Invalid symbol entry at index {}", index))
            })
        })
        .collect()
}

fn parse_asset_type(raw: Option<&str>) -> Result<Option<AssetClass>, ApiError> {
    match raw.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(None),
        Some(t) => t.parse::<AssetClass>().map(Some).map_err(ApiError::BadRequest),
    }
}

async fn fetch_bulk_prices(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<BulkPricesResponse>> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let symbols = parse_symbols(&body)?;

    let result = state.price_service.get_prices(&symbols).await?;
    Ok(Json(BulkPricesResponse {
        saved_to_database: result.saved_to_database(),
        prices: result.prices,
        cached: result.cached,
    }))
}

async fn get_cached_prices(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CachedPricesQuery>,
) -> ApiResult<Json<CachedPricesResponse>> {
    let asset_class = parse_asset_type(query.asset_type.as_deref())?;
    let snapshot = state.price_service.get_cached_prices(asset_class)?;
    Ok(Json(snapshot.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/prices/bulk",
        get(get_cached_prices).post(fetch_bulk_prices),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_symbols_accepts_mixed_entries() {
        let body = json!({ "symbols": ["aapl", { "symbol": "gold", "type": "COMMODITY" }] });
        let specs = parse_symbols(&body).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].asset_class(), Some(AssetClass::Commodity));
    }

    #[test]
    fn test_parse_symbols_rejects_bad_shapes() {
        for body in [
            json!({}),
            json!({ "symbols": "AAPL" }),
            json!({ "symbols": [1] }),
            json!({ "symbols": [{ "type": "STOCK" }] }),
        ] {
            assert!(matches!(parse_symbols(&body), Err(ApiError::BadRequest(_))));
        }
    }

    #[test]
    fn test_parse_asset_type() {
        assert_eq!(parse_asset_type(None).unwrap(), None);
        assert_eq!(parse_asset_type(Some("")).unwrap(), None);
        assert_eq!(
            parse_asset_type(Some("crypto")).unwrap(),
            Some(AssetClass::Crypto)
        );
        assert!(parse_asset_type(Some("FOREX")).is_err());
    }

    #[test]
    fn test_empty_snapshot_shape() {
        let body = serde_json::to_value(CachedPricesResponse::from(CachedPriceSnapshot::Empty))
            .unwrap();
        assert_eq!(
            body,
            json!({
                "prices": {},
                "cached": false,
                "fromDatabase": true,
                "count": 0,
                "message": EMPTY_STORE_MESSAGE,
            })
        );
    }
}
