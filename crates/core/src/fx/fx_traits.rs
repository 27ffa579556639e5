use super::fx_errors::FxError;
use super::fx_model::{Converted, ExchangeRate, ProviderRate};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Contract for a live exchange-rate provider.
///
/// Implementations (HTTP rate APIs) live outside the core. Failures are
/// classified so the service can decide between retrying and degrading.
#[async_trait]
pub trait ExchangeRateProviderTrait: Send + Sync {
    async fn fetch_rate(&self, from: &str, to: &str) -> Result<ProviderRate, FxError>;
}

/// Contract for FX service operations.
///
/// Both operations are total: every provider failure is absorbed by the
/// cache/fallback chain, so aggregations always get a number back. The
/// `RateSource` on the result records which path was taken.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    async fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> ExchangeRate;

    async fn convert_amount(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Converted;

    /// Warms the cache for a set of pairs, chunked to respect provider
    /// rate limits.
    async fn refresh_rates(&self, pairs: Vec<(String, String)>);
}
