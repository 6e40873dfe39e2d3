use std::sync::Arc;

use axum::extract::State;

use crate::{error::ApiResult, main_lib::AppState};

pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the price database answers.
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    quotehub_storage_sqlite::ping(&state.pool)?;
    Ok("ok")
}
