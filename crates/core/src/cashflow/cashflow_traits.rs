use super::cashflow_model::{CategoryBreakdown, Expense, Income, MonthlyProjection};
use crate::errors::Result;
use crate::fx::Money;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for income repository operations.
pub trait IncomeRepositoryTrait: Send + Sync {
    fn get_all(&self, owner_id: &str) -> Result<Vec<Income>>;
}

/// Trait for expense repository operations.
pub trait ExpenseRepositoryTrait: Send + Sync {
    fn get_all(&self, owner_id: &str) -> Result<Vec<Expense>>;
}

/// Trait for cashflow aggregation operations.
///
/// Every operation reduces to the reporting currency and is best-effort
/// under rate-provider outages: a degraded conversion still contributes
/// a number, it never drops the entity or fails the aggregate.
#[async_trait]
pub trait CashflowServiceTrait: Send + Sync {
    async fn get_monthly_income(&self, owner_id: &str, reporting_currency: &str) -> Result<Money>;

    async fn get_monthly_expenses(&self, owner_id: &str, reporting_currency: &str)
        -> Result<Money>;

    async fn get_income_breakdown(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<CategoryBreakdown>>;

    async fn get_expense_breakdown(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<CategoryBreakdown>>;

    /// Twelve months of projected income starting from the current
    /// month, re-evaluating each entity's activity window per month.
    async fn get_income_projections(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<MonthlyProjection>>;

    async fn get_expense_projections(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<MonthlyProjection>>;

    /// Combined monthly payment across the owner's open loans, in the
    /// reporting currency. Paid-off loans contribute nothing.
    async fn get_monthly_loan_payments(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Money>;

    /// Monthly loan payments as a percentage of monthly income.
    /// Returns 0 when income is zero or negative.
    async fn get_debt_to_income_ratio(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Decimal>;
}
