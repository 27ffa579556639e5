use super::risk_model::{
    CurrencyExposure, CurrencyRiskAnalysis, HedgingOpportunity, RiskLevel, VolatilityMetric,
};
use crate::constants::{
    CONCENTRATION_RISK_PENALTY, DISPLAY_DECIMAL_PRECISION, EXPOSURE_HIGH_CONCENTRATION,
    EXPOSURE_HIGH_PENALTY, EXPOSURE_MEDIUM_CONCENTRATION, EXPOSURE_MEDIUM_PENALTY,
    EXPOSURE_SCORE_HIGH, EXPOSURE_SCORE_MEDIUM, HEDGE_RATIO, HEDGING_EXPOSURE_THRESHOLD,
    RECOMMEND_DIVERSIFY_EXPOSURE, RECOMMEND_HIGH_RISK_EXPOSURE, RECOMMEND_MIN_CURRENCIES,
};
use crate::errors::Result;
use crate::fx::{currency_base_risk, currency_volatility, FxServiceTrait};
use crate::portfolio::investments::{Investment, InvestmentRepositoryTrait};
use crate::settings::SettingsServiceTrait;
use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

/// Risk level of a single currency exposure: the currency's base risk
/// plus a concentration penalty when the position dominates the
/// portfolio.
fn exposure_risk_level(currency: &str, percentage: Decimal) -> RiskLevel {
    let mut score = currency_base_risk(currency);
    if percentage > EXPOSURE_HIGH_CONCENTRATION {
        score += EXPOSURE_HIGH_PENALTY;
    } else if percentage > EXPOSURE_MEDIUM_CONCENTRATION {
        score += EXPOSURE_MEDIUM_PENALTY;
    }

    if score >= EXPOSURE_SCORE_HIGH {
        RiskLevel::High
    } else if score >= EXPOSURE_SCORE_MEDIUM {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Groups investment value by native currency, converts each group into
/// the reporting currency, and ranks the exposures by share of total.
///
/// Shared by the portfolio summary and the currency risk report.
pub async fn calculate_currency_exposure(
    investments: &[Investment],
    fx_service: &dyn FxServiceTrait,
    reporting_currency: &str,
) -> Vec<CurrencyExposure> {
    let mut value_by_currency: HashMap<String, Decimal> = HashMap::new();

    for investment in investments {
        let value = investment.current_value();
        let converted = fx_service
            .convert_amount(value.amount, &value.currency, reporting_currency)
            .await;
        *value_by_currency
            .entry(value.currency)
            .or_insert(Decimal::ZERO) += converted.amount;
    }

    let grand_total: Decimal = value_by_currency.values().sum();

    let mut exposures: Vec<CurrencyExposure> = value_by_currency
        .into_iter()
        .map(|(currency, total_value)| {
            let percentage = if grand_total > Decimal::ZERO {
                (total_value / grand_total * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION)
            } else {
                Decimal::ZERO
            };
            CurrencyExposure {
                risk_level: exposure_risk_level(&currency, percentage),
                currency,
                total_value: total_value.round_dp(DISPLAY_DECIMAL_PRECISION),
                percentage,
            }
        })
        .collect();

    exposures.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    exposures
}

/// Trait for currency risk operations.
#[async_trait]
pub trait CurrencyRiskServiceTrait: Send + Sync {
    async fn get_currency_exposure(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<CurrencyExposure>>;

    /// Full currency risk report in the owner's primary currency.
    async fn get_currency_risk_analysis(&self, owner_id: &str) -> Result<CurrencyRiskAnalysis>;
}

pub struct CurrencyRiskService {
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
}

impl CurrencyRiskService {
    pub fn new(
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
    ) -> Self {
        CurrencyRiskService {
            investment_repository,
            settings_service,
            fx_service,
        }
    }

    fn build_recommendations(exposures: &[CurrencyExposure]) -> Vec<String> {
        let mut recommendations = Vec::new();

        if let Some(top) = exposures.first() {
            if top.percentage > RECOMMEND_DIVERSIFY_EXPOSURE {
                recommendations.push(format!(
                    "{}% of your portfolio is denominated in {}. Consider spreading new positions across other currencies.",
                    top.percentage, top.currency
                ));
            }
        }

        if !exposures.is_empty() && exposures.len() < RECOMMEND_MIN_CURRENCIES {
            recommendations.push(format!(
                "Your portfolio spans only {} currencies. Holding at least {} reduces single-currency risk.",
                exposures.len(),
                RECOMMEND_MIN_CURRENCIES
            ));
        }

        for exposure in exposures {
            if exposure.risk_level == RiskLevel::High
                && exposure.percentage > RECOMMEND_HIGH_RISK_EXPOSURE
            {
                recommendations.push(format!(
                    "{} is a high-risk currency at {}% of your portfolio. Consider reducing this exposure.",
                    exposure.currency, exposure.percentage
                ));
            }
        }

        recommendations
    }

    fn build_hedging_opportunities(exposures: &[CurrencyExposure]) -> Vec<HedgingOpportunity> {
        exposures
            .iter()
            .filter(|e| e.percentage > HEDGING_EXPOSURE_THRESHOLD)
            .map(|e| {
                let hedge_percentage =
                    (e.percentage * HEDGE_RATIO).round_dp(DISPLAY_DECIMAL_PRECISION);
                HedgingOpportunity {
                    currency: e.currency.clone(),
                    exposure_percentage: e.percentage,
                    hedge_percentage,
                    suggestion: format!(
                        "Hedge roughly half of the {} exposure, about {}% of portfolio value.",
                        e.currency, hedge_percentage
                    ),
                }
            })
            .collect()
    }

    /// Concentration penalty plus per-currency base risk weighted by
    /// exposure share, clamped to [0, 100].
    fn score_exposures(exposures: &[CurrencyExposure]) -> Decimal {
        let mut score = Decimal::ZERO;

        if exposures
            .iter()
            .any(|e| e.percentage > EXPOSURE_HIGH_CONCENTRATION)
        {
            score += CONCENTRATION_RISK_PENALTY;
        }

        for exposure in exposures {
            score += currency_base_risk(&exposure.currency) * exposure.percentage / dec!(100);
        }

        score
            .clamp(Decimal::ZERO, dec!(100))
            .round_dp(DISPLAY_DECIMAL_PRECISION)
    }
}

#[async_trait]
impl CurrencyRiskServiceTrait for CurrencyRiskService {
    async fn get_currency_exposure(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<CurrencyExposure>> {
        let investments = self.investment_repository.get_all(owner_id)?;
        Ok(calculate_currency_exposure(&investments, self.fx_service.as_ref(), reporting_currency)
            .await)
    }

    async fn get_currency_risk_analysis(&self, owner_id: &str) -> Result<CurrencyRiskAnalysis> {
        let reporting_currency = self.settings_service.get_primary_currency(owner_id)?;
        debug!(
            "Building currency risk analysis for {} in {}",
            owner_id, reporting_currency
        );

        let exposures = self
            .get_currency_exposure(owner_id, &reporting_currency)
            .await?;

        let volatility_metrics = exposures
            .iter()
            .map(|e| VolatilityMetric {
                currency: e.currency.clone(),
                annualized_volatility: currency_volatility(&e.currency),
                exposure_percentage: e.percentage,
            })
            .collect();

        Ok(CurrencyRiskAnalysis {
            risk_score: Self::score_exposures(&exposures),
            recommendations: Self::build_recommendations(&exposures),
            hedging_opportunities: Self::build_hedging_opportunities(&exposures),
            volatility_metrics,
        })
    }
}
