//! Budget conversion endpoint.

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::conversion::{BudgetConversion, convert_budget as convert};
use crate::core::budget::Budget;

/// Request body for a budget conversion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertBudgetRequest {
    pub budget: Option<Budget>,
    pub target_currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConvertBudgetResponse {
    pub success: bool,
    #[serde(flatten)]
    pub conversion: BudgetConversion,
}

/// Parses the raw body; a blank, `null` or non-object body counts as missing fields.
fn parse_request(body: &[u8]) -> ApiResult<(Budget, String)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::MissingFields);
    }

    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))?;
    if !value.is_object() {
        return Err(ApiError::MissingFields);
    }

    let request: ConvertBudgetRequest = serde_json::from_value(value)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?;

    match (request.budget, request.target_currency) {
        (Some(budget), Some(target)) => Ok((budget, target)),
        _ => Err(ApiError::MissingFields),
    }
}

/// POST `/convert-budget` - Converts a budget into the target currency.
async fn convert_budget(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ConvertBudgetResponse>> {
    let (budget, target) = parse_request(&body)?;
    let conversion = convert(&state.rates, budget, &target).await?;

    Ok(Json(ConvertBudgetResponse {
        success: true,
        conversion,
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/convert-budget", post(convert_budget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_requires_both_fields() {
        for body in [
            "",
            "  ",
            "null",
            "[]",
            "{}",
            r#"{"budget": {"food": 1}}"#,
            r#"{"targetCurrency": "PLN"}"#,
            r#"{"budget": null, "targetCurrency": "PLN"}"#,
        ] {
            let result = parse_request(body.as_bytes());
            assert!(
                matches!(result, Err(ApiError::MissingFields)),
                "body {body:?} should be missing fields"
            );
        }
    }

    #[test]
    fn test_parse_request_reports_bad_json() {
        let result = parse_request(b"{not json");
        assert!(
            matches!(result, Err(ApiError::BadRequest(msg)) if msg.starts_with("Invalid JSON body"))
        );

        let result = parse_request(br#"{"budget": {"food": "lots"}, "targetCurrency": "PLN"}"#);
        assert!(
            matches!(result, Err(ApiError::BadRequest(msg)) if msg.starts_with("Invalid request body"))
        );
    }

    #[test]
    fn test_parse_request_accepts_valid_body() {
        let body = br#"{"budget": {"food": 10, "baseCurrency": "EUR"}, "targetCurrency": "pln"}"#;
        let (budget, target) = parse_request(body).unwrap();
        assert_eq!(budget.base_currency.as_deref(), Some("EUR"));
        assert_eq!(budget.amounts["food"], 10.0);
        assert_eq!(target, "pln");
    }
}
