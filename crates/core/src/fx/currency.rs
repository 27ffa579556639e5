//! Currency code normalization and static per-currency classification.
//!
//! The tables here back the offline fallback chain and the risk scoring:
//! they are deliberately deterministic so that rate synthesis and risk
//! levels are reproducible without a live provider.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Uppercases and trims a currency code. Pure, never fails.
pub fn normalize_currency_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Reserve and G10-adjacent currencies that trade near parity bands
/// against each other.
const MAJOR_CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "CHF", "CAD", "AUD", "NZD", "SEK", "NOK", "DKK", "SGD", "HKD",
];

pub fn is_major_currency(code: &str) -> bool {
    MAJOR_CURRENCIES.contains(&code)
}

/// Base risk score for a currency on a 0-100 scale.
///
/// Reserve currencies score low; emerging-market currencies score high.
/// Unlisted codes are treated as emerging.
pub fn currency_base_risk(code: &str) -> Decimal {
    match code {
        "USD" => dec!(5),
        "CHF" => dec!(6),
        "EUR" => dec!(8),
        "DKK" => dec!(9),
        "GBP" | "CAD" | "SGD" => dec!(10),
        "JPY" | "HKD" | "SEK" => dec!(12),
        "NOK" => dec!(13),
        "AUD" => dec!(14),
        "NZD" => dec!(15),
        "KRW" => dec!(20),
        "PLN" => dec!(22),
        "CNY" | "THB" => dec!(25),
        "INR" => dec!(30),
        "IDR" => dec!(35),
        "MXN" => dec!(40),
        "BRL" => dec!(45),
        "ZAR" => dec!(50),
        "TRY" => dec!(60),
        "ARS" => dec!(65),
        _ => dec!(35),
    }
}

/// Indicative annualized volatility (percent) of a currency against a
/// reserve-currency basket. Used for the volatility metrics in the
/// currency risk report.
pub fn currency_volatility(code: &str) -> Decimal {
    match code {
        "USD" => dec!(4.5),
        "EUR" | "CHF" => dec!(6.5),
        "DKK" => dec!(6.8),
        "GBP" | "CAD" | "SGD" => dec!(8.0),
        "JPY" | "SEK" | "NOK" => dec!(9.5),
        "AUD" | "NZD" | "HKD" => dec!(10.5),
        "KRW" | "PLN" => dec!(12.0),
        "CNY" | "THB" => dec!(13.5),
        "INR" | "IDR" => dec!(15.0),
        "MXN" | "BRL" => dec!(18.0),
        "ZAR" => dec!(21.0),
        "TRY" | "ARS" => dec!(28.0),
        _ => dec!(16.0),
    }
}

/// Pinned indicative rates for the most commonly requested pairs.
/// Used when the live provider is unconfigured or exhausted and no
/// cached rate exists.
const FALLBACK_RATES: &[(&str, &str, Decimal)] = &[
    ("USD", "EUR", dec!(0.92)),
    ("USD", "GBP", dec!(0.79)),
    ("USD", "JPY", dec!(149.50)),
    ("USD", "CHF", dec!(0.88)),
    ("USD", "CAD", dec!(1.36)),
    ("USD", "AUD", dec!(1.52)),
    ("USD", "NZD", dec!(1.66)),
    ("USD", "CNY", dec!(7.24)),
    ("USD", "INR", dec!(83.10)),
    ("USD", "BRL", dec!(4.95)),
    ("USD", "MXN", dec!(17.15)),
    ("EUR", "GBP", dec!(0.86)),
    ("EUR", "JPY", dec!(162.50)),
    ("EUR", "CHF", dec!(0.96)),
    ("GBP", "JPY", dec!(189.20)),
];

/// Synthesizes a deterministic rate for a currency pair.
///
/// Listed pairs (or their inverses) come from [`FALLBACK_RATES`].
/// Unlisted pairs use a magnitude heuristic: majors trade near parity
/// with each other, while major/emerging crosses use asymmetric bands.
pub fn fallback_rate(from: &str, to: &str) -> Decimal {
    if from == to {
        return Decimal::ONE;
    }

    for (f, t, rate) in FALLBACK_RATES {
        if *f == from && *t == to {
            return *rate;
        }
        if *f == to && *t == from && !rate.is_zero() {
            return Decimal::ONE / *rate;
        }
    }

    match (is_major_currency(from), is_major_currency(to)) {
        (true, true) => dec!(1.05),
        (true, false) => dec!(25),
        (false, true) => dec!(0.04),
        (false, false) => dec!(1.25),
    }
}
