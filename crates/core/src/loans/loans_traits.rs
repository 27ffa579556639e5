use super::loans_model::{AmortizationEntry, DebtPayoffStrategies, Loan};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Trait for loan repository operations.
#[async_trait]
pub trait LoanRepositoryTrait: Send + Sync {
    fn get_all(&self, owner_id: &str) -> Result<Vec<Loan>>;
    fn get_by_id(&self, owner_id: &str, loan_id: &str) -> Result<Option<Loan>>;
    async fn update(&self, loan: Loan) -> Result<Loan>;
}

/// Trait for loan service operations.
#[async_trait]
pub trait LoanServiceTrait: Send + Sync {
    fn get_amortization_schedule(&self, loan: &Loan) -> Vec<AmortizationEntry>;
    fn get_total_interest(&self, loan: &Loan) -> Decimal;
    fn get_payoff_date(&self, loan: &Loan) -> NaiveDate;
    async fn get_debt_payoff_strategies(&self, owner_id: &str) -> Result<DebtPayoffStrategies>;

    /// Applies a payment to a loan. The balance floors at zero and the
    /// next payment date advances one calendar month. Fails with
    /// `Error::NotFound` when the loan id does not resolve.
    async fn make_payment(&self, owner_id: &str, loan_id: &str, amount: Decimal) -> Result<Loan>;
}
