//! Unit tests for the currency risk service.

use super::*;
use crate::errors::Result;
use crate::fx::{
    normalize_currency_code, Converted, ExchangeRate, FxServiceTrait, Money, RateSource,
};
use crate::portfolio::investments::{
    Investment, InvestmentRepositoryTrait, InvestmentType, PricePoint,
};
use crate::settings::{SettingsServiceTrait, UserPreferences};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockInvestmentRepository {
    investments: Vec<Investment>,
}

impl InvestmentRepositoryTrait for MockInvestmentRepository {
    fn get_all(&self, owner_id: &str) -> Result<Vec<Investment>> {
        Ok(self
            .investments
            .iter()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

struct MockSettingsService {
    primary_currency: String,
}

impl SettingsServiceTrait for MockSettingsService {
    fn get_preferences(&self, _owner_id: &str) -> Result<UserPreferences> {
        unimplemented!("not needed for these tests")
    }

    fn get_primary_currency(&self, _owner_id: &str) -> Result<String> {
        Ok(self.primary_currency.clone())
    }
}

/// Converts every pair at parity, so exposure percentages can be read
/// straight off the native amounts.
struct ParityFxService;

#[async_trait]
impl FxServiceTrait for ParityFxService {
    async fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> ExchangeRate {
        ExchangeRate {
            from_currency: normalize_currency_code(from_currency),
            to_currency: normalize_currency_code(to_currency),
            rate: Decimal::ONE,
            source: RateSource::Mock,
            timestamp: Utc::now(),
        }
    }

    async fn convert_amount(
        &self,
        amount: Decimal,
        _from_currency: &str,
        to_currency: &str,
    ) -> Converted {
        Converted {
            amount,
            currency: normalize_currency_code(to_currency),
            source: RateSource::Mock,
        }
    }

    async fn refresh_rates(&self, _pairs: Vec<(String, String)>) {}
}

fn cash_position(id: &str, amount: Decimal, currency: &str) -> Investment {
    Investment {
        id: id.to_string(),
        owner_id: "user-1".to_string(),
        symbol: format!("CASH-{}", currency),
        investment_type: InvestmentType::Cash,
        quantity: dec!(1),
        purchase_price: Money::new(amount, currency),
        current_price: PricePoint::Quoted(Money::new(amount, currency)),
    }
}

fn make_risk_service(investments: Vec<Investment>) -> CurrencyRiskService {
    CurrencyRiskService::new(
        Arc::new(MockInvestmentRepository { investments }),
        Arc::new(MockSettingsService {
            primary_currency: "USD".to_string(),
        }),
        Arc::new(ParityFxService),
    )
}

// ============================================================================
// Currency exposure
// ============================================================================

#[tokio::test]
async fn test_exposure_groups_by_currency_and_sorts_descending() {
    let service = make_risk_service(vec![
        cash_position("i-1", dec!(4000), "USD"),
        cash_position("i-2", dec!(2000), "USD"),
        cash_position("i-3", dec!(3000), "EUR"),
        cash_position("i-4", dec!(1000), "TRY"),
    ]);

    let exposures = service.get_currency_exposure("user-1", "USD").await.unwrap();

    assert_eq!(exposures.len(), 3);

    assert_eq!(exposures[0].currency, "USD");
    assert_eq!(exposures[0].total_value, dec!(6000));
    assert_eq!(exposures[0].percentage, dec!(60.00));
    // Base risk 5 plus the high-concentration penalty lands at 45.
    assert_eq!(exposures[0].risk_level, RiskLevel::Medium);

    assert_eq!(exposures[1].currency, "EUR");
    assert_eq!(exposures[1].percentage, dec!(30.00));
    assert_eq!(exposures[1].risk_level, RiskLevel::Low);

    assert_eq!(exposures[2].currency, "TRY");
    assert_eq!(exposures[2].percentage, dec!(10.00));
    assert_eq!(exposures[2].risk_level, RiskLevel::High);
}

#[tokio::test]
async fn test_exposure_empty_portfolio() {
    let service = make_risk_service(vec![]);

    let exposures = service.get_currency_exposure("user-1", "USD").await.unwrap();

    assert!(exposures.is_empty());
}

// ============================================================================
// Risk analysis
// ============================================================================

#[tokio::test]
async fn test_analysis_flags_concentrated_risky_currency() {
    let service = make_risk_service(vec![
        cash_position("i-1", dec!(7500), "TRY"),
        cash_position("i-2", dec!(2500), "USD"),
    ]);

    let analysis = service.get_currency_risk_analysis("user-1").await.unwrap();

    // Concentration penalty 30, plus 60 * 0.75 + 5 * 0.25.
    assert_eq!(analysis.risk_score, dec!(76.25));

    // Top exposure above 70%, fewer than 3 currencies, and a high-risk
    // currency above 20% each produce one recommendation.
    assert_eq!(analysis.recommendations.len(), 3);
    assert!(analysis.recommendations[0].contains("TRY"));
    assert!(analysis.recommendations[2].contains("high-risk"));

    // Only the 75% exposure clears the hedging threshold.
    assert_eq!(analysis.hedging_opportunities.len(), 1);
    assert_eq!(analysis.hedging_opportunities[0].currency, "TRY");
    assert_eq!(analysis.hedging_opportunities[0].exposure_percentage, dec!(75.00));
    assert_eq!(analysis.hedging_opportunities[0].hedge_percentage, dec!(37.50));

    assert_eq!(analysis.volatility_metrics.len(), 2);
    assert_eq!(analysis.volatility_metrics[0].currency, "TRY");
    assert_eq!(analysis.volatility_metrics[0].annualized_volatility, dec!(28.0));
    assert_eq!(analysis.volatility_metrics[1].currency, "USD");
    assert_eq!(analysis.volatility_metrics[1].annualized_volatility, dec!(4.5));
}

#[tokio::test]
async fn test_analysis_single_stable_currency() {
    let service = make_risk_service(vec![cash_position("i-1", dec!(10000), "USD")]);

    let analysis = service.get_currency_risk_analysis("user-1").await.unwrap();

    // Concentration penalty 30 plus the full USD base risk of 5.
    assert_eq!(analysis.risk_score, dec!(35.00));

    // 100% in one currency: diversify plus minimum-currency count.
    assert_eq!(analysis.recommendations.len(), 2);

    assert_eq!(analysis.hedging_opportunities.len(), 1);
    assert_eq!(analysis.hedging_opportunities[0].hedge_percentage, dec!(50.00));
}

#[tokio::test]
async fn test_analysis_empty_portfolio_scores_zero() {
    let service = make_risk_service(vec![]);

    let analysis = service.get_currency_risk_analysis("user-1").await.unwrap();

    assert_eq!(analysis.risk_score, Decimal::ZERO);
    assert!(analysis.recommendations.is_empty());
    assert!(analysis.hedging_opportunities.is_empty());
    assert!(analysis.volatility_metrics.is_empty());
}

#[tokio::test]
async fn test_balanced_exposures_score_without_penalty() {
    let service = make_risk_service(vec![
        cash_position("i-1", dec!(4000), "USD"),
        cash_position("i-2", dec!(3000), "EUR"),
        cash_position("i-3", dec!(3000), "GBP"),
    ]);

    let analysis = service.get_currency_risk_analysis("user-1").await.unwrap();

    // No exposure above 50%: 5*0.4 + 8*0.3 + 10*0.3.
    assert_eq!(analysis.risk_score, dec!(7.40));
    assert!(analysis.recommendations.is_empty());
    // 40% and both 30% exposures clear the 25% hedging threshold.
    assert_eq!(analysis.hedging_opportunities.len(), 3);
}
