//! Resolves the exchange rates used for a request, live when possible.

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::core::config::CurrencyFreaksConfig;
use crate::core::currency::{ExchangeRateProvider, Rates};
use crate::providers::currency_freaks::CurrencyFreaksProvider;
use crate::providers::fallback::fallback_rates;

/// Prefers a live provider and falls back to the static table on any failure.
#[derive(Clone)]
pub struct RateProvider {
    live: Option<Arc<dyn ExchangeRateProvider>>,
}

impl RateProvider {
    pub fn new(live: Arc<dyn ExchangeRateProvider>) -> Self {
        RateProvider { live: Some(live) }
    }

    /// Never contacts a live service.
    pub fn fallback_only() -> Self {
        RateProvider { live: None }
    }

    /// Builds the provider for the given config; without a real API key only
    /// fallback rates are served.
    pub fn from_config(config: &CurrencyFreaksConfig) -> Result<Self> {
        if !config.has_api_key() {
            info!("Currency Freaks API key not configured, using fallback rates");
            return Ok(Self::fallback_only());
        }
        info!(url = %config.base_url, "Currency Freaks API configured");
        let live = CurrencyFreaksProvider::new(config)?;
        Ok(Self::new(Arc::new(live)))
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    #[instrument(skip(self))]
    pub async fn fetch_rates(&self, base: &str) -> Rates {
        let Some(live) = &self.live else {
            debug!("Serving fallback rates");
            return Rates::Fallback(fallback_rates(base));
        };

        match live.fetch_rates(base).await {
            Ok(table) => Rates::Live(table),
            Err(e) => {
                warn!(error = %e, "Error fetching exchange rates, using fallback rates");
                Rates::Fallback(fallback_rates(base))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::{RateSource, RateTable};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockLiveProvider {
        call_count: AtomicUsize,
        fail: bool,
    }

    impl MockLiveProvider {
        fn new(fail: bool) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl ExchangeRateProvider for MockLiveProvider {
        async fn fetch_rates(&self, base: &str) -> Result<RateTable> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(anyhow!("connection refused"));
            }
            Ok(RateTable::from([
                (base.to_string(), 1.0),
                ("PLN".to_string(), 4.0),
            ]))
        }
    }

    #[tokio::test]
    async fn test_live_rates_are_preferred() {
        let live = Arc::new(MockLiveProvider::new(false));
        let provider = RateProvider::new(live.clone());

        let rates = provider.fetch_rates("USD").await;
        assert_eq!(rates.source(), RateSource::Live);
        assert_eq!(rates.get("PLN"), Some(4.0));
        assert_eq!(live.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_falls_back_without_retry() {
        let live = Arc::new(MockLiveProvider::new(true));
        let provider = RateProvider::new(live.clone());

        let rates = provider.fetch_rates("PLN").await;
        assert_eq!(rates.source(), RateSource::Fallback);
        assert_eq!(rates.get("PLN"), Some(1.0));
        assert!((rates.get("USD").unwrap() - 1.0 / 3.98).abs() < 1e-12);
        assert_eq!(live.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rates_are_fetched_on_every_call() {
        let live = Arc::new(MockLiveProvider::new(false));
        let provider = RateProvider::new(live.clone());

        provider.fetch_rates("USD").await;
        provider.fetch_rates("USD").await;
        assert_eq!(live.call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_placeholder_key_means_fallback_only() {
        let provider = RateProvider::from_config(&CurrencyFreaksConfig::default()).unwrap();
        assert!(!provider.is_live());

        let rates = provider.fetch_rates("USD").await;
        assert_eq!(rates.source(), RateSource::Fallback);
        assert_eq!(rates.get("PLN"), Some(3.98));
    }

    #[test]
    fn test_configured_key_enables_live_provider() {
        let config = CurrencyFreaksConfig {
            api_key: "real-key".to_string(),
            ..CurrencyFreaksConfig::default()
        };
        assert!(RateProvider::from_config(&config).unwrap().is_live());
    }
}
