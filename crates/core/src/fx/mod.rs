//! FX (Foreign Exchange) module - domain models, services, and traits.

pub mod currency;
mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;

pub use currency::{
    currency_base_risk, currency_volatility, fallback_rate, is_major_currency,
    normalize_currency_code,
};
pub use fx_errors::FxError;
pub use fx_model::{Converted, ExchangeRate, Money, ProviderRate, RateSource};
pub use fx_service::FxService;
pub use fx_traits::{ExchangeRateProviderTrait, FxServiceTrait};
