use super::investments_model::{Investment, InvestmentType, PortfolioSummary, TypeAllocation};
use super::investments_traits::{InvestmentRepositoryTrait, PortfolioServiceTrait};
use crate::constants::{
    CRYPTO_HIGH_RISK_SHARE, CRYPTO_MEDIUM_RISK_SHARE, DISPLAY_DECIMAL_PRECISION,
    INVESTMENT_TYPE_COUNT, STOCK_HIGH_RISK_SHARE, STOCK_MEDIUM_RISK_SHARE,
};
use crate::errors::Result;
use crate::fx::{normalize_currency_code, FxServiceTrait};
use crate::portfolio::risk::{calculate_currency_exposure, RiskLevel};
use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

pub struct PortfolioService {
    repository: Arc<dyn InvestmentRepositoryTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn InvestmentRepositoryTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
    ) -> Self {
        PortfolioService {
            repository,
            fx_service,
        }
    }

    /// Share of portfolio value, in percent, held in one investment type.
    fn type_share(
        value_by_type: &HashMap<InvestmentType, Decimal>,
        investment_type: InvestmentType,
        total_value: Decimal,
    ) -> Decimal {
        if total_value <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        value_by_type
            .get(&investment_type)
            .copied()
            .unwrap_or(Decimal::ZERO)
            / total_value
            * dec!(100)
    }

    fn portfolio_risk_level(
        value_by_type: &HashMap<InvestmentType, Decimal>,
        total_value: Decimal,
    ) -> RiskLevel {
        let crypto_share = Self::type_share(value_by_type, InvestmentType::Crypto, total_value);
        let stock_share = Self::type_share(value_by_type, InvestmentType::Stock, total_value);

        if crypto_share > CRYPTO_HIGH_RISK_SHARE || stock_share > STOCK_HIGH_RISK_SHARE {
            RiskLevel::High
        } else if crypto_share > CRYPTO_MEDIUM_RISK_SHARE || stock_share > STOCK_MEDIUM_RISK_SHARE {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Converts each holding's value and cost into the reporting
    /// currency, returning the totals and the per-type value map.
    async fn value_investments(
        &self,
        investments: &[Investment],
        reporting: &str,
    ) -> (Decimal, Decimal, HashMap<InvestmentType, Decimal>) {
        let mut total_value = Decimal::ZERO;
        let mut total_cost = Decimal::ZERO;
        let mut value_by_type: HashMap<InvestmentType, Decimal> = HashMap::new();

        for investment in investments {
            let value = investment.current_value();
            let cost = investment.cost_basis();

            let converted_value = self
                .fx_service
                .convert_amount(value.amount, &value.currency, reporting)
                .await
                .amount;
            let converted_cost = self
                .fx_service
                .convert_amount(cost.amount, &cost.currency, reporting)
                .await
                .amount;

            total_value += converted_value;
            total_cost += converted_cost;
            *value_by_type
                .entry(investment.investment_type)
                .or_insert(Decimal::ZERO) += converted_value;
        }

        (total_value, total_cost, value_by_type)
    }

    fn diversification_score(value_by_type: &HashMap<InvestmentType, Decimal>) -> Decimal {
        let represented = value_by_type
            .values()
            .filter(|value| **value > Decimal::ZERO)
            .count() as u32;

        Decimal::from(represented.min(INVESTMENT_TYPE_COUNT)) * dec!(100)
            / Decimal::from(INVESTMENT_TYPE_COUNT)
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn get_portfolio_summary(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<PortfolioSummary> {
        debug!(
            "Computing portfolio summary for {} in {}",
            owner_id, reporting_currency
        );

        let investments: Vec<Investment> = self.repository.get_all(owner_id)?;
        let reporting = normalize_currency_code(reporting_currency);

        let (total_value, total_cost, value_by_type) =
            self.value_investments(&investments, &reporting).await;

        let total_gain_loss = total_value - total_cost;
        let gain_loss_percentage = if total_cost > Decimal::ZERO {
            (total_gain_loss / total_cost * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION)
        } else {
            Decimal::ZERO
        };

        let currency_exposure =
            calculate_currency_exposure(&investments, self.fx_service.as_ref(), &reporting).await;

        Ok(PortfolioSummary {
            currency: reporting,
            total_value: total_value.round_dp(DISPLAY_DECIMAL_PRECISION),
            total_gain_loss: total_gain_loss.round_dp(DISPLAY_DECIMAL_PRECISION),
            gain_loss_percentage,
            diversification_score: Self::diversification_score(&value_by_type),
            risk_level: Self::portfolio_risk_level(&value_by_type, total_value),
            currency_exposure,
        })
    }

    async fn get_type_allocations(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<TypeAllocation>> {
        let investments: Vec<Investment> = self.repository.get_all(owner_id)?;
        let reporting = normalize_currency_code(reporting_currency);

        let (total_value, _, value_by_type) =
            self.value_investments(&investments, &reporting).await;

        let mut allocations: Vec<TypeAllocation> = value_by_type
            .into_iter()
            .map(|(investment_type, value)| {
                let percentage = if total_value > Decimal::ZERO {
                    (value / total_value * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION)
                } else {
                    Decimal::ZERO
                };
                TypeAllocation {
                    investment_type,
                    value: value.round_dp(DISPLAY_DECIMAL_PRECISION),
                    percentage,
                }
            })
            .collect();

        allocations.sort_by(|a, b| b.value.cmp(&a.value));
        Ok(allocations)
    }
}
