//! Exchange rate lookup.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::core::currency::{RateSource, RateTable, normalize_currency};

/// Query parameters for the rate lookup.
#[derive(Debug, Deserialize)]
pub struct ExchangeRatesQuery {
    /// Base currency code, `USD` when absent.
    pub base: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRatesResponse {
    pub success: bool,
    pub base: String,
    pub rates: RateTable,
    pub rate_source: RateSource,
}

/// GET `/exchange-rates` - Rates for every known currency against `base`.
async fn get_exchange_rates(
    State(state): State<AppState>,
    query: Result<Query<ExchangeRatesQuery>, QueryRejection>,
) -> ApiResult<Json<ExchangeRatesResponse>> {
    let Query(query) = query?;
    let base = normalize_currency(query.base.as_deref());
    let rates = state.rates.fetch_rates(&base).await;
    let rate_source = rates.source();
    info!(base = %base, source = %rate_source, "Exchange rates resolved");

    Ok(Json(ExchangeRatesResponse {
        success: true,
        base,
        rates: rates.into_table(),
        rate_source,
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/exchange-rates", get(get_exchange_rates))
}
