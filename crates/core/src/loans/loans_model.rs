//! Loan domain models.

use crate::fx::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LoanKind {
    Mortgage,
    Auto,
    Student,
    Personal,
    CreditCard,
    #[serde(other)]
    Other,
}

/// Domain model representing a loan.
///
/// Invariant: `principal`, `current_balance`, and `monthly_payment`
/// share one currency. The balance only moves through payment
/// application and never goes below zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub owner_id: String,
    pub kind: LoanKind,
    pub principal: Money,
    pub current_balance: Money,
    /// Annual interest rate in percent, >= 0.
    pub interest_rate: Decimal,
    pub term_months: u32,
    pub monthly_payment: Money,
    pub start_date: NaiveDate,
    pub next_payment_date: NaiveDate,
}

/// One row of an amortization schedule. Ephemeral: recomputed on
/// demand, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    pub payment_number: u32,
    pub payment_date: NaiveDate,
    pub principal_payment: Decimal,
    pub interest_payment: Decimal,
    pub remaining_balance: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PayoffOrdering {
    /// Smallest balance first.
    Snowball,
    /// Highest interest rate first.
    Avalanche,
}

/// A debt payoff plan: the order to attack loans in, plus aggregate
/// interest and time figures for the whole debt load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayoffStrategy {
    pub ordering: PayoffOrdering,
    /// Loan ids in payoff priority order.
    pub loan_order: Vec<String>,
    pub total_interest: Decimal,
    pub months_to_payoff: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoffStrategies {
    pub snowball: PayoffStrategy,
    pub avalanche: PayoffStrategy,
}
