use super::currency::{fallback_rate, normalize_currency_code};
use super::fx_model::{Converted, ExchangeRate, RateSource};
use super::fx_traits::{ExchangeRateProviderTrait, FxServiceTrait};
use crate::constants::{
    PROVIDER_MAX_ATTEMPTS, PROVIDER_RETRY_BASE_DELAY_MS, RATE_CACHE_TTL_SECS,
    RATE_REFRESH_BATCH_DELAY_MS, RATE_REFRESH_BATCH_SIZE,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration as StdDuration;

/// TTL validity is anchored on `fetched_at`, the instant the quote was
/// inserted. `quoted_at` is the provider's own market timestamp, which
/// can lag arbitrarily (daily-close feeds stamp hours in the past) and
/// must not shorten the cache window.
#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: Decimal,
    quoted_at: DateTime<Utc>,
    fetched_at: DateTime<Utc>,
}

/// Currency conversion service.
///
/// Constructed once at process start and shared by reference; there is
/// no ambient global state. The rate cache is the only shared mutable
/// state: a process-wide map keyed by normalized currency pair, each
/// entry valid for [`RATE_CACHE_TTL_SECS`] from its fetch timestamp,
/// updated last-writer-wins.
///
/// Rate resolution order: identity, fresh cache, live provider with
/// bounded retry, expired cache entry, pinned fallback table. The chain
/// always terminates in a number; no caller ever sees a provider error.
#[derive(Clone)]
pub struct FxService {
    provider: Option<Arc<dyn ExchangeRateProviderTrait>>,
    cache: Arc<DashMap<(String, String), CachedRate>>,
    ttl: Duration,
}

impl FxService {
    pub fn new(provider: Arc<dyn ExchangeRateProviderTrait>) -> Self {
        Self {
            provider: Some(provider),
            cache: Arc::new(DashMap::new()),
            ttl: Duration::seconds(RATE_CACHE_TTL_SECS),
        }
    }

    /// A service with no live provider; every non-identity, non-cached
    /// lookup synthesizes a deterministic rate with source `Mock`.
    pub fn without_provider() -> Self {
        Self {
            provider: None,
            cache: Arc::new(DashMap::new()),
            ttl: Duration::seconds(RATE_CACHE_TTL_SECS),
        }
    }

    /// Overrides the cache TTL. Mostly useful in tests.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn cached(&self, key: &(String, String)) -> Option<CachedRate> {
        self.cache.get(key).map(|entry| *entry)
    }

    async fn fetch_with_retry(&self, from: &str, to: &str) -> Option<CachedRate> {
        let provider = self.provider.as_ref()?;

        for attempt in 1..=PROVIDER_MAX_ATTEMPTS {
            match provider.fetch_rate(from, to).await {
                Ok(quote) => {
                    let cached = CachedRate {
                        rate: quote.rate,
                        quoted_at: quote.timestamp,
                        fetched_at: Utc::now(),
                    };
                    self.cache
                        .insert((from.to_string(), to.to_string()), cached);
                    return Some(cached);
                }
                Err(e) => {
                    warn!(
                        "Rate fetch {}/{} failed (attempt {}/{}): {}",
                        from, to, attempt, PROVIDER_MAX_ATTEMPTS, e
                    );
                    if attempt < PROVIDER_MAX_ATTEMPTS {
                        // Linearly increasing delay between attempts.
                        let delay = PROVIDER_RETRY_BASE_DELAY_MS * attempt as u64;
                        tokio::time::sleep(StdDuration::from_millis(delay)).await;
                    }
                }
            }
        }

        None
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> ExchangeRate {
        let from = normalize_currency_code(from_currency);
        let to = normalize_currency_code(to_currency);

        if from == to {
            return ExchangeRate::identity(&from);
        }

        let key = (from.clone(), to.clone());
        let now = Utc::now();

        let cached = self.cached(&key);
        if let Some(entry) = cached {
            if now - entry.fetched_at < self.ttl {
                return ExchangeRate {
                    from_currency: from,
                    to_currency: to,
                    rate: entry.rate,
                    source: RateSource::Cache,
                    timestamp: entry.quoted_at,
                };
            }
        }

        if self.provider.is_none() {
            debug!("No rate provider configured, synthesizing {}/{}", from, to);
            return ExchangeRate {
                rate: fallback_rate(&from, &to),
                from_currency: from,
                to_currency: to,
                source: RateSource::Mock,
                timestamp: now,
            };
        }

        if let Some(fetched) = self.fetch_with_retry(&from, &to).await {
            return ExchangeRate {
                from_currency: from,
                to_currency: to,
                rate: fetched.rate,
                source: RateSource::Api,
                timestamp: fetched.quoted_at,
            };
        }

        // Provider exhausted. An expired cache entry beats the table.
        if let Some(entry) = cached {
            warn!(
                "Using stale {}/{} rate quoted at {} after provider exhaustion",
                from, to, entry.quoted_at
            );
            return ExchangeRate {
                from_currency: from,
                to_currency: to,
                rate: entry.rate,
                source: RateSource::StaleCache,
                timestamp: entry.quoted_at,
            };
        }

        warn!("No cached {}/{} rate, using fallback table", from, to);
        ExchangeRate {
            rate: fallback_rate(&from, &to),
            from_currency: from,
            to_currency: to,
            source: RateSource::Fallback,
            timestamp: now,
        }
    }

    async fn convert_amount(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Converted {
        let rate = self.get_exchange_rate(from_currency, to_currency).await;
        Converted {
            amount: amount * rate.rate,
            currency: rate.to_currency,
            source: rate.source,
        }
    }

    async fn refresh_rates(&self, pairs: Vec<(String, String)>) {
        let total_batches = pairs.len().div_ceil(RATE_REFRESH_BATCH_SIZE);

        for (index, batch) in pairs.chunks(RATE_REFRESH_BATCH_SIZE).enumerate() {
            let lookups = batch
                .iter()
                .map(|(from, to)| self.get_exchange_rate(from, to));
            futures::future::join_all(lookups).await;

            if index + 1 < total_batches {
                tokio::time::sleep(StdDuration::from_millis(RATE_REFRESH_BATCH_DELAY_MS)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fx_model::ProviderRate;
    use super::super::FxError;
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// A provider that fails a fixed number of times before succeeding.
    struct FlakyProvider {
        failures_before_success: u32,
        rate: Decimal,
        calls: AtomicU32,
    }

    impl FlakyProvider {
        fn new(failures_before_success: u32, rate: Decimal) -> Self {
            Self {
                failures_before_success,
                rate,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl ExchangeRateProviderTrait for FlakyProvider {
        async fn fetch_rate(&self, _from: &str, _to: &str) -> Result<ProviderRate, FxError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                Err(FxError::Provider("connection reset".to_string()))
            } else {
                Ok(ProviderRate {
                    rate: self.rate,
                    timestamp: Utc::now(),
                })
            }
        }
    }

    /// A provider whose quotes carry a market timestamp well in the
    /// past, like a daily-close feed.
    struct BackdatedProvider {
        rate: Decimal,
        quote_age: Duration,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ExchangeRateProviderTrait for BackdatedProvider {
        async fn fetch_rate(&self, _from: &str, _to: &str) -> Result<ProviderRate, FxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ProviderRate {
                rate: self.rate,
                timestamp: Utc::now() - self.quote_age,
            })
        }
    }

    struct DeadProvider;

    #[async_trait]
    impl ExchangeRateProviderTrait for DeadProvider {
        async fn fetch_rate(&self, from: &str, to: &str) -> Result<ProviderRate, FxError> {
            Err(FxError::RateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_identity_rate_is_one_internal() {
        let service = FxService::without_provider();

        for code in ["USD", "EUR", "gbp", " jpy "] {
            let rate = service.get_exchange_rate(code, code).await;
            assert_eq!(rate.rate, Decimal::ONE);
            assert_eq!(rate.source, RateSource::Internal);
        }

        let converted = service.convert_amount(dec!(123.45), "USD", "usd").await;
        assert_eq!(converted.amount, dec!(123.45));
        assert_eq!(converted.source, RateSource::Internal);
    }

    #[tokio::test]
    async fn test_unconfigured_provider_synthesizes_mock_rate() {
        let service = FxService::without_provider();

        let rate = service.get_exchange_rate("USD", "EUR").await;
        assert_eq!(rate.source, RateSource::Mock);
        assert_eq!(rate.rate, dec!(0.92));

        // Heuristic pair, still deterministic.
        let heuristic = service.get_exchange_rate("SEK", "NOK").await;
        assert_eq!(heuristic.source, RateSource::Mock);
        assert_eq!(heuristic.rate, dec!(1.05));
    }

    #[tokio::test]
    async fn test_api_fetch_then_cache_hit() {
        let provider = Arc::new(FlakyProvider::new(0, dec!(1.25)));
        let service = FxService::new(provider.clone());

        let first = service.get_exchange_rate("GBP", "USD").await;
        assert_eq!(first.source, RateSource::Api);
        assert_eq!(first.rate, dec!(1.25));

        let second = service.get_exchange_rate("GBP", "USD").await;
        assert_eq!(second.source, RateSource::Cache);
        assert_eq!(second.rate, dec!(1.25));

        // The cache hit must not touch the provider again.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_old_market_timestamps_do_not_expire_cache_entries() {
        let provider = Arc::new(BackdatedProvider {
            rate: dec!(1.25),
            quote_age: Duration::hours(1),
            calls: AtomicU32::new(0),
        });
        let service = FxService::new(provider.clone());

        let first = service.get_exchange_rate("GBP", "USD").await;
        assert_eq!(first.source, RateSource::Api);

        // The quote is an hour old but was fetched just now, so it is
        // still inside the TTL window.
        let second = service.get_exchange_rate("GBP", "USD").await;
        assert_eq!(second.source, RateSource::Cache);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        // Callers still see the provider's market timestamp.
        assert!(Utc::now() - second.timestamp >= Duration::minutes(59));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_succeeds_on_third_attempt() {
        let provider = Arc::new(FlakyProvider::new(2, dec!(0.85)));
        let service = FxService::new(provider.clone());

        let rate = service.get_exchange_rate("USD", "EUR").await;
        assert_eq!(rate.source, RateSource::Api);
        assert_eq!(rate.rate, dec!(0.85));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_provider_without_cache_uses_fallback_table() {
        let service = FxService::new(Arc::new(DeadProvider));

        let rate = service.get_exchange_rate("USD", "JPY").await;
        assert_eq!(rate.source, RateSource::Fallback);
        assert_eq!(rate.rate, dec!(149.50));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_cache_beats_fallback_after_exhaustion() {
        // Zero TTL forces the cached entry to be treated as expired.
        let provider = Arc::new(FlakyProvider::new(0, dec!(1.10)));
        let service = FxService::new(provider.clone()).with_ttl(Duration::seconds(0));

        let first = service.get_exchange_rate("EUR", "USD").await;
        assert_eq!(first.source, RateSource::Api);

        // Exhaust the provider on the next lookup: it now always fails.
        provider.calls.store(0, Ordering::SeqCst);
        let dead = FxService {
            provider: Some(Arc::new(DeadProvider)),
            cache: service.cache.clone(),
            ttl: Duration::seconds(0),
        };

        let second = dead.get_exchange_rate("EUR", "USD").await;
        assert_eq!(second.source, RateSource::StaleCache);
        assert_eq!(second.rate, dec!(1.10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_rates_warms_cache_in_batches() {
        let provider = Arc::new(FlakyProvider::new(0, dec!(2)));
        let service = FxService::new(provider.clone());

        let pairs: Vec<(String, String)> = ["EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "NZD"]
            .iter()
            .map(|c| (c.to_string(), "USD".to_string()))
            .collect();

        service.refresh_rates(pairs).await;

        let rate = service.get_exchange_rate("JPY", "USD").await;
        assert_eq!(rate.source, RateSource::Cache);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 7);
    }
}
