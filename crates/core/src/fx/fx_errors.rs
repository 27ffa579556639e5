use thiserror::Error;

/// Errors from the exchange-rate layer.
///
/// Provider failures are always recovered inside `FxService` via the
/// cache/fallback chain; they surface here only to provider
/// implementations and logs.
#[derive(Error, Debug)]
pub enum FxError {
    /// The live provider failed: HTTP error, malformed payload, or an
    /// unexpected response shape.
    #[error("Rate provider error: {0}")]
    Provider(String),

    /// The provider rate-limited the request.
    #[error("Rate limited by provider: {0}")]
    RateLimited(String),

    /// The provider has no data for the requested pair.
    #[error("No rate available for {from}/{to}")]
    RateUnavailable { from: String, to: String },

    /// The currency code is not a plausible ISO-4217 code.
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    /// The in-memory rate cache failed.
    #[error("Rate cache error: {0}")]
    CacheError(String),
}
