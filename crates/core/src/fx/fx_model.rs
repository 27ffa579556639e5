use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount denominated in a single currency.
///
/// Two `Money` values are only directly summable when their currencies
/// match; anything else goes through the fx service first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Money {
            amount,
            currency: currency.into(),
        }
    }

    pub fn zero(currency: impl Into<String>) -> Self {
        Money {
            amount: Decimal::ZERO,
            currency: currency.into(),
        }
    }
}

/// Where a rate (or a converted amount) came from.
///
/// Exposing the source lets callers and tests observe which leg of the
/// degradation chain produced a number instead of relying on logs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RateSource {
    /// Identity conversion (same currency on both sides).
    Internal,
    /// Fresh cache hit within the TTL.
    Cache,
    /// Fetched from the live provider on this call.
    Api,
    /// Expired cache entry used after the provider was exhausted.
    StaleCache,
    /// Pinned fallback table, used after the provider was exhausted.
    Fallback,
    /// Synthesized rate; the provider is not configured.
    Mock,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateSource::Internal => "internal",
            RateSource::Cache => "cache",
            RateSource::Api => "api",
            RateSource::StaleCache => "stale-cache",
            RateSource::Fallback => "fallback",
            RateSource::Mock => "mock",
        }
    }

    /// True when the rate did not come from a live or freshly cached quote.
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            RateSource::StaleCache | RateSource::Fallback | RateSource::Mock
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    #[serde(serialize_with = "serialize_decimal_6")]
    pub rate: Decimal,
    pub source: RateSource,
    pub timestamp: DateTime<Utc>,
}

impl ExchangeRate {
    /// The `from == to` rate: always exactly 1, source `Internal`.
    pub fn identity(currency: &str) -> Self {
        ExchangeRate {
            from_currency: currency.to_string(),
            to_currency: currency.to_string(),
            rate: Decimal::ONE,
            source: RateSource::Internal,
            timestamp: Utc::now(),
        }
    }
}

fn serialize_decimal_6<S>(decimal: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let rounded = decimal.round_dp(6);
    serializer.serialize_str(&rounded.to_string())
}

/// Result of a currency conversion, carrying the path that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Converted {
    pub amount: Decimal,
    pub currency: String,
    pub source: RateSource,
}

impl Converted {
    pub fn into_money(self) -> Money {
        Money {
            amount: self.amount,
            currency: self.currency,
        }
    }
}

/// A single quote from the live rate provider.
#[derive(Debug, Clone)]
pub struct ProviderRate {
    pub rate: Decimal,
    pub timestamp: DateTime<Utc>,
}
