use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::config::CurrencyFreaksConfig;
use crate::core::currency::{ExchangeRateProvider, RateTable};

// CurrencyFreaksProvider implementation for ExchangeRateProvider
pub struct CurrencyFreaksProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl CurrencyFreaksProvider {
    pub fn new(config: &CurrencyFreaksConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("globobudget/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(CurrencyFreaksProvider {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CurrencyFreaksResponse {
    rates: Option<HashMap<String, RateValue>>,
}

/// The service quotes rates as strings; plain numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    fn to_rate(&self) -> Option<f64> {
        let rate = match self {
            RateValue::Number(n) => *n,
            RateValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (rate.is_finite() && rate > 0.0).then_some(rate)
    }
}

#[async_trait]
impl ExchangeRateProvider for CurrencyFreaksProvider {
    #[instrument(name = "CurrencyFreaksFetch", skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[("apikey", self.api_key.as_str()), ("base", base)],
        )
        .with_context(|| format!("Invalid rates URL: {}", self.base_url))?;
        debug!("Requesting exchange rates from {}", self.base_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;

        let data: CurrencyFreaksResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        let raw_rates = data
            .rates
            .ok_or_else(|| anyhow!("Invalid API response format: missing rates"))?;

        let mut rates = RateTable::new();
        for (currency, value) in &raw_rates {
            match value.to_rate() {
                Some(rate) => {
                    rates.insert(currency.to_uppercase(), rate);
                }
                None => debug!(currency = %currency, value = ?value, "Skipping unusable rate"),
            }
        }

        if rates.is_empty() {
            return Err(anyhow!("No usable rates found for base currency: {}", base));
        }

        debug!(count = rates.len(), "Received exchange rates");
        Ok(rates)
    }
}
