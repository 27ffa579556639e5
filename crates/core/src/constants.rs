//! Named tuning constants shared across services.
//!
//! The risk and concentration thresholds mirror the product's historical
//! values; they are configuration knobs, not analytically derived.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Validity window for a cached exchange rate.
pub const RATE_CACHE_TTL_SECS: i64 = 15 * 60;

/// Maximum attempts against the live rate provider per lookup.
pub const PROVIDER_MAX_ATTEMPTS: u32 = 3;

/// Base delay between provider retries; attempt `n` waits `n * base`.
pub const PROVIDER_RETRY_BASE_DELAY_MS: u64 = 500;

/// Hard cap on amortization schedule length (60 years of monthly payments).
pub const MAX_SCHEDULE_MONTHS: u32 = 720;

/// Remaining balance at or below this is treated as fully paid.
pub const PAID_OFF_EPSILON: Decimal = dec!(0.01);

/// Decimal precision for display values.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Number of recognized investment type categories (diversification denominator).
pub const INVESTMENT_TYPE_COUNT: u32 = 8;

/// Crypto share of portfolio value above which the portfolio is high risk.
pub const CRYPTO_HIGH_RISK_SHARE: Decimal = dec!(20);

/// Crypto share above which the portfolio is at least medium risk.
pub const CRYPTO_MEDIUM_RISK_SHARE: Decimal = dec!(5);

/// Stock share of portfolio value above which the portfolio is high risk.
pub const STOCK_HIGH_RISK_SHARE: Decimal = dec!(80);

/// Stock share above which the portfolio is at least medium risk.
pub const STOCK_MEDIUM_RISK_SHARE: Decimal = dec!(50);

/// Single-currency exposure above this percentage is a high concentration.
pub const EXPOSURE_HIGH_CONCENTRATION: Decimal = dec!(50);

/// Single-currency exposure above this percentage is a medium concentration.
pub const EXPOSURE_MEDIUM_CONCENTRATION: Decimal = dec!(30);

/// Risk-score points added to a currency exposure above the high
/// concentration threshold.
pub const EXPOSURE_HIGH_PENALTY: Decimal = dec!(40);

/// Risk-score points added to a currency exposure above the medium
/// concentration threshold.
pub const EXPOSURE_MEDIUM_PENALTY: Decimal = dec!(20);

/// Combined currency score at or above which an exposure is high risk.
pub const EXPOSURE_SCORE_HIGH: Decimal = dec!(50);

/// Combined currency score at or above which an exposure is medium risk.
pub const EXPOSURE_SCORE_MEDIUM: Decimal = dec!(25);

/// Exposure percentage that triggers a diversification recommendation.
pub const RECOMMEND_DIVERSIFY_EXPOSURE: Decimal = dec!(70);

/// Minimum number of distinct currencies before a breadth recommendation fires.
pub const RECOMMEND_MIN_CURRENCIES: usize = 3;

/// High-risk currency exposure above this percentage triggers a warning.
pub const RECOMMEND_HIGH_RISK_EXPOSURE: Decimal = dec!(20);

/// Exposure percentage above which a hedging opportunity is emitted.
pub const HEDGING_EXPOSURE_THRESHOLD: Decimal = dec!(25);

/// Fraction of an exposure the hedging suggestion covers.
pub const HEDGE_RATIO: Decimal = dec!(0.5);

/// Concentration penalty applied to the aggregate risk score when any
/// currency exceeds [`EXPOSURE_HIGH_CONCENTRATION`].
pub const CONCENTRATION_RISK_PENALTY: Decimal = dec!(30);

/// Batch size for bulk rate refreshes against the live provider.
pub const RATE_REFRESH_BATCH_SIZE: usize = 5;

/// Pause between rate refresh batches, to respect provider rate limits.
pub const RATE_REFRESH_BATCH_DELAY_MS: u64 = 1_000;

/// Number of months covered by cashflow projections.
pub const PROJECTION_MONTHS: u32 = 12;

/// Default reporting currency when the user has no stored preference.
pub const DEFAULT_REPORTING_CURRENCY: &str = "USD";
