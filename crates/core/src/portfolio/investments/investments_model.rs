//! Investment domain models.

use crate::fx::Money;
use crate::portfolio::risk::{CurrencyExposure, RiskLevel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The recognized investment type categories. The diversification score
/// measures how many of these are represented in a portfolio.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum InvestmentType {
    Stock,
    Etf,
    MutualFund,
    Bond,
    Crypto,
    RealEstate,
    Commodity,
    Cash,
}

/// The market price of a holding, when one is known.
///
/// The purchase-price fallback lives in [`PricePoint::effective`] so the
/// rule exists in exactly one place instead of at every call site.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum PricePoint {
    Quoted(Money),
    Unquoted,
}

impl PricePoint {
    /// The quoted price, or the purchase price when no quote exists.
    pub fn effective<'a>(&'a self, purchase_price: &'a Money) -> &'a Money {
        match self {
            PricePoint::Quoted(money) => money,
            PricePoint::Unquoted => purchase_price,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub owner_id: String,
    pub symbol: String,
    pub investment_type: InvestmentType,
    pub quantity: Decimal,
    pub purchase_price: Money,
    pub current_price: PricePoint,
}

impl Investment {
    pub fn effective_price(&self) -> &Money {
        self.current_price.effective(&self.purchase_price)
    }

    /// Market value in the holding's native currency.
    pub fn current_value(&self) -> Money {
        let price = self.effective_price();
        Money::new(price.amount * self.quantity, price.currency.clone())
    }

    /// Acquisition cost in the holding's native currency.
    pub fn cost_basis(&self) -> Money {
        Money::new(
            self.purchase_price.amount * self.quantity,
            self.purchase_price.currency.clone(),
        )
    }
}

/// Value held in one investment type, as a slice of total portfolio
/// value in the reporting currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeAllocation {
    pub investment_type: InvestmentType,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Portfolio-level view model, entirely in the reporting currency.
/// Recomputed on demand, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub currency: String,
    pub total_value: Decimal,
    pub total_gain_loss: Decimal,
    pub gain_loss_percentage: Decimal,
    /// [0, 100]: share of recognized investment types represented.
    pub diversification_score: Decimal,
    pub risk_level: RiskLevel,
    pub currency_exposure: Vec<CurrencyExposure>,
}
