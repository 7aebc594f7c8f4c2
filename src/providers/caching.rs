//! Memoizing wrappers around the providers, backed by one session cache.
//!
//! Only successful fetches are stored; a failure is returned as is and the
//! next call goes back to the network.

use crate::core::cache::Cache;
use crate::core::error::Result;
use crate::core::exchange::{DollarMarket, ExchangeRateProvider, QuoteProvider, SpotQuote};
use crate::core::inflation::CpiProvider;
use crate::core::series::NormalizedSeries;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Identity of a fetch operation and its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKey {
    Cpi,
    ExchangeRateHistory,
    Quote(DollarMarket),
}

#[derive(Debug, Clone)]
pub enum CachedFetch {
    Series(NormalizedSeries),
    Quote(SpotQuote),
}

pub type SessionCache = Cache<FetchKey, CachedFetch>;

async fn cached_series(cache: &SessionCache, key: FetchKey) -> Option<NormalizedSeries> {
    match cache.get(&key).await {
        Some(CachedFetch::Series(series)) => Some(series),
        _ => None,
    }
}

pub struct CachingCpiProvider<T: CpiProvider> {
    inner: T,
    cache: Arc<SessionCache>,
}

impl<T: CpiProvider> CachingCpiProvider<T> {
    pub fn new(inner: T, cache: Arc<SessionCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<T: CpiProvider> CpiProvider for CachingCpiProvider<T> {
    async fn fetch_cpi(&self) -> Result<NormalizedSeries> {
        if let Some(series) = cached_series(&self.cache, FetchKey::Cpi).await {
            return Ok(series);
        }
        let series = self.inner.fetch_cpi().await?;
        self.cache
            .put(FetchKey::Cpi, CachedFetch::Series(series.clone()))
            .await;
        Ok(series)
    }
}

pub struct CachingExchangeRateProvider<T: ExchangeRateProvider> {
    inner: T,
    cache: Arc<SessionCache>,
}

impl<T: ExchangeRateProvider> CachingExchangeRateProvider<T> {
    pub fn new(inner: T, cache: Arc<SessionCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<T: ExchangeRateProvider> ExchangeRateProvider for CachingExchangeRateProvider<T> {
    async fn fetch_exchange_rate_history(&self) -> Result<NormalizedSeries> {
        let key = FetchKey::ExchangeRateHistory;
        if let Some(series) = cached_series(&self.cache, key).await {
            return Ok(series);
        }
        let series = self.inner.fetch_exchange_rate_history().await?;
        self.cache
            .put(key, CachedFetch::Series(series.clone()))
            .await;
        Ok(series)
    }
}

pub struct CachingQuoteProvider<T: QuoteProvider> {
    inner: T,
    cache: Arc<SessionCache>,
}

impl<T: QuoteProvider> CachingQuoteProvider<T> {
    pub fn new(inner: T, cache: Arc<SessionCache>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<T: QuoteProvider> QuoteProvider for CachingQuoteProvider<T> {
    async fn fetch_quote(&self, market: DollarMarket) -> Result<SpotQuote> {
        let key = FetchKey::Quote(market);
        if let Some(CachedFetch::Quote(quote)) = self.cache.get(&key).await {
            return Ok(quote);
        }
        debug!("Fetching {} quote", market);
        let quote = self.inner.fetch_quote(market).await?;
        self.cache.put(key, CachedFetch::Quote(quote.clone())).await;
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::test_clock::ManualClock;
    use crate::core::config::DolarApiProviderConfig;
    use crate::core::error::PipelineError;
    use crate::providers::dolar_api::DolarApiProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct CountingCpi {
        call_count: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl<'a> CpiProvider for &'a CountingCpi {
        async fn fetch_cpi(&self) -> Result<NormalizedSeries> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(PipelineError::network("test", "connection reset"));
            }
            NormalizedSeries::normalize("test", &["value"], Vec::new())
        }
    }

    #[tokio::test]
    async fn test_caching_cpi_provider() {
        let inner = CountingCpi {
            call_count: AtomicUsize::new(0),
            fail: false,
        };
        let provider = CachingCpiProvider::new(&inner, Arc::new(SessionCache::new()));

        provider.fetch_cpi().await.unwrap();
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 1);

        // Second call - should be cached
        provider.fetch_cpi().await.unwrap();
        assert_eq!(inner.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let inner = CountingCpi {
            call_count: AtomicUsize::new(0),
            fail: true,
        };
        let cache = Arc::new(SessionCache::new());
        let provider = CachingCpiProvider::new(&inner, Arc::clone(&cache));

        assert!(provider.fetch_cpi().await.is_err());
        assert!(provider.fetch_cpi().await.is_err());

        assert_eq!(inner.call_count.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_ttl_expiry_refetches() {
        let inner = CountingCpi {
            call_count: AtomicUsize::new(0),
            fail: false,
        };
        let clock = Arc::new(ManualClock::new());
        let cache = Arc::new(SessionCache::with_policy(
            Some(Duration::from_secs(60)),
            clock.clone(),
        ));
        let provider = CachingCpiProvider::new(&inner, cache);

        provider.fetch_cpi().await.unwrap();
        clock.advance(Duration::from_secs(61));
        provider.fetch_cpi().await.unwrap();

        assert_eq!(inner.call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_memoized_quote_issues_one_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dolares/oficial"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"compra": 1000.0, "venta": 1050.0}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dolares/blue"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"compra": 1200.0, "venta": 1220.0}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let inner = DolarApiProvider::new(
            &DolarApiProviderConfig {
                base_url: mock_server.uri(),
            },
            Duration::from_secs(5),
        )
        .unwrap();
        let provider = CachingQuoteProvider::new(inner, Arc::new(SessionCache::new()));

        let first = provider.fetch_quote(DollarMarket::Official).await.unwrap();
        let second = provider.fetch_quote(DollarMarket::Official).await.unwrap();
        let blue = provider.fetch_quote(DollarMarket::Blue).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(blue.buy, Some(1200.0));
        // Expectations (one request per market) are verified when the server drops
    }
}
