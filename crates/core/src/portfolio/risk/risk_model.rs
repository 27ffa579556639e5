//! Risk analysis view models. Derived values, never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// The slice of portfolio value denominated in one currency, expressed
/// in the reporting currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyExposure {
    pub currency: String,
    pub total_value: Decimal,
    pub percentage: Decimal,
    pub risk_level: RiskLevel,
}

/// A suggestion to hedge part of an outsized currency exposure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HedgingOpportunity {
    pub currency: String,
    pub exposure_percentage: Decimal,
    /// Share of total portfolio value the hedge would cover.
    pub hedge_percentage: Decimal,
    pub suggestion: String,
}

/// Indicative volatility of one currency exposure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityMetric {
    pub currency: String,
    pub annualized_volatility: Decimal,
    pub exposure_percentage: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRiskAnalysis {
    /// Aggregate currency risk on a [0, 100] scale.
    pub risk_score: Decimal,
    pub recommendations: Vec<String>,
    pub hedging_opportunities: Vec<HedgingOpportunity>,
    pub volatility_metrics: Vec<VolatilityMetric>,
}
