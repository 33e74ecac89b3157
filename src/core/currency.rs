//! Exchange rate abstractions

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Currency code -> amount of that currency per one unit of the base currency.
pub type RateTable = BTreeMap<String, f64>;

pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// A source of live exchange rates.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &str) -> Result<RateTable>;
}

/// Where a rate table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Live,
    Fallback,
}

impl Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RateSource::Live => "live",
                RateSource::Fallback => "fallback",
            }
        )
    }
}

/// Rates resolved for one request, tagged with their origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Rates {
    Live(RateTable),
    Fallback(RateTable),
}

impl Rates {
    pub fn source(&self) -> RateSource {
        match self {
            Rates::Live(_) => RateSource::Live,
            Rates::Fallback(_) => RateSource::Fallback,
        }
    }

    pub fn table(&self) -> &RateTable {
        match self {
            Rates::Live(table) | Rates::Fallback(table) => table,
        }
    }

    pub fn into_table(self) -> RateTable {
        match self {
            Rates::Live(table) | Rates::Fallback(table) => table,
        }
    }

    pub fn get(&self, currency: &str) -> Option<f64> {
        self.table().get(currency).copied()
    }
}

/// Trims and uppercases a currency code, substituting the default for blanks.
pub fn normalize_currency(code: Option<&str>) -> String {
    match code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_uppercase(),
        _ => DEFAULT_BASE_CURRENCY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_currency() {
        assert_eq!(normalize_currency(Some("pln")), "PLN");
        assert_eq!(normalize_currency(Some(" eur ")), "EUR");
        assert_eq!(normalize_currency(Some("")), "USD");
        assert_eq!(normalize_currency(None), "USD");
    }

    #[test]
    fn test_rates_source_and_lookup() {
        let table = RateTable::from([("EUR".to_string(), 0.92)]);
        let live = Rates::Live(table.clone());
        let fallback = Rates::Fallback(table);

        assert_eq!(live.source(), RateSource::Live);
        assert_eq!(fallback.source(), RateSource::Fallback);
        assert_eq!(live.get("EUR"), Some(0.92));
        assert_eq!(fallback.get("GBP"), None);
        assert_eq!(RateSource::Fallback.to_string(), "fallback");
        assert_eq!(
            serde_json::to_string(&RateSource::Live).unwrap(),
            "\"live\""
        );
    }
}
