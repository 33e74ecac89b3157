//! Converts a whole budget into a target currency using resolved rates.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::core::budget::{self, Budget, BudgetSummary};
use crate::core::currency::{RateSource, normalize_currency};
use crate::rates::RateProvider;

#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("Currency {0} not supported")]
    UnsupportedCurrency(String),

    #[error("Converted budget is not a finite amount")]
    NonFiniteAmount,
}

/// Outcome of converting a budget, with both sides totalled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConversion {
    pub base_currency: String,
    pub target_currency: String,
    pub exchange_rate: f64,
    pub original_budget: BudgetSummary,
    pub converted_budget: BudgetSummary,
    pub rate_source: RateSource,
}

/// Fetches rates for the budget's currency (`USD` when untagged) and
/// converts every amount into `target`.
pub async fn convert_budget(
    provider: &RateProvider,
    budget: Budget,
    target: &str,
) -> Result<BudgetConversion, ConversionError> {
    let base_currency = normalize_currency(budget.base_currency.as_deref());
    let target_currency = target.trim().to_uppercase();

    let rates = provider.fetch_rates(&base_currency).await;
    let exchange_rate = rates
        .get(&target_currency)
        .ok_or_else(|| ConversionError::UnsupportedCurrency(target_currency.clone()))?;

    let converted_budget = BudgetSummary::new(budget::convert(&budget, exchange_rate));
    if !converted_budget.is_finite() {
        return Err(ConversionError::NonFiniteAmount);
    }
    let original_budget = BudgetSummary::new(budget);

    info!(
        base = %base_currency,
        target = %target_currency,
        rate = exchange_rate,
        source = %rates.source(),
        "Budget converted"
    );

    Ok(BudgetConversion {
        base_currency,
        target_currency,
        exchange_rate,
        original_budget,
        converted_budget,
        rate_source: rates.source(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::budget::Category;

    fn trip_budget(base: Option<&str>) -> Budget {
        Budget::new(base)
            .with_amount(Category::Food, 500.0)
            .with_amount(Category::Activities, 300.0)
            .with_amount(Category::Shopping, 200.0)
            .with_amount(Category::Hotel, 1000.0)
            .with_amount(Category::Transportation, 400.0)
    }

    #[tokio::test]
    async fn test_convert_trip_budget_to_pln() {
        let provider = RateProvider::fallback_only();
        let result = convert_budget(&provider, trip_budget(Some("USD")), "PLN")
            .await
            .unwrap();

        assert_eq!(result.base_currency, "USD");
        assert_eq!(result.target_currency, "PLN");
        assert_eq!(result.exchange_rate, 3.98);
        assert_eq!(result.rate_source, RateSource::Fallback);
        assert_eq!(result.original_budget.total, 2400.0);
        assert_eq!(result.converted_budget.total, 9552.0);
        assert_eq!(result.converted_budget.budget.amount(Category::Food), 1990.0);
        assert_eq!(
            result.original_budget.budget.base_currency.as_deref(),
            Some("USD")
        );
    }

    #[tokio::test]
    async fn test_untagged_budget_defaults_to_usd() {
        let provider = RateProvider::fallback_only();
        let result = convert_budget(&provider, trip_budget(None), "eur")
            .await
            .unwrap();

        assert_eq!(result.base_currency, "USD");
        assert_eq!(result.target_currency, "EUR");
        assert_eq!(result.exchange_rate, 0.92);
    }

    #[tokio::test]
    async fn test_unsupported_target_currency() {
        let provider = RateProvider::fallback_only();
        let result = convert_budget(&provider, trip_budget(Some("USD")), "ZZZ").await;

        assert_eq!(
            result.unwrap_err(),
            ConversionError::UnsupportedCurrency("ZZZ".to_string())
        );
    }

    #[tokio::test]
    async fn test_overflowing_amount_is_rejected() {
        let provider = RateProvider::fallback_only();
        let budget = Budget::default().with_amount(Category::Hotel, f64::MAX);
        let result = convert_budget(&provider, budget, "JPY").await;

        assert_eq!(result.unwrap_err(), ConversionError::NonFiniteAmount);
    }
}
