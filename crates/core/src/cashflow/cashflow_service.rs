use super::cashflow_model::{CategoryBreakdown, MonthlyProjection};
use super::cashflow_traits::{
    CashflowServiceTrait, ExpenseRepositoryTrait, IncomeRepositoryTrait,
};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, PROJECTION_MONTHS};
use crate::errors::Result;
use crate::fx::{normalize_currency_code, FxServiceTrait, Money};
use crate::loans::LoanRepositoryTrait;
use async_trait::async_trait;
use chrono::{Datelike, Months, NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

/// One entity's contribution to a monthly aggregate, before conversion.
struct MonthlyRow {
    category: String,
    amount: Decimal,
    currency: String,
}

pub struct CashflowService {
    income_repository: Arc<dyn IncomeRepositoryTrait>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    loan_repository: Arc<dyn LoanRepositoryTrait>,
    fx_service: Arc<dyn FxServiceTrait>,
}

impl CashflowService {
    pub fn new(
        income_repository: Arc<dyn IncomeRepositoryTrait>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        loan_repository: Arc<dyn LoanRepositoryTrait>,
        fx_service: Arc<dyn FxServiceTrait>,
    ) -> Self {
        CashflowService {
            income_repository,
            expense_repository,
            loan_repository,
            fx_service,
        }
    }

    fn current_month_start() -> NaiveDate {
        let today = Utc::now().date_naive();
        today.with_day(1).unwrap_or(today)
    }

    async fn to_reporting(&self, amount: Decimal, currency: &str, reporting: &str) -> Decimal {
        if normalize_currency_code(currency) == normalize_currency_code(reporting) {
            return amount;
        }
        self.fx_service
            .convert_amount(amount, currency, reporting)
            .await
            .amount
    }

    /// Converts each row into the reporting currency and accumulates a
    /// grand total plus a by-category map. Conversion is total, so no
    /// row is ever dropped from the aggregate.
    async fn reduce_rows(
        &self,
        rows: Vec<MonthlyRow>,
        reporting: &str,
    ) -> (Decimal, HashMap<String, Decimal>) {
        let mut total = Decimal::ZERO;
        let mut by_category: HashMap<String, Decimal> = HashMap::new();

        for row in rows {
            let converted = self
                .to_reporting(row.amount, &row.currency, reporting)
                .await;
            total += converted;
            *by_category.entry(row.category).or_insert(Decimal::ZERO) += converted;
        }

        (total, by_category)
    }

    fn build_breakdown(
        total: Decimal,
        by_category: HashMap<String, Decimal>,
    ) -> Vec<CategoryBreakdown> {
        let mut breakdown: Vec<CategoryBreakdown> = by_category
            .into_iter()
            .map(|(category, amount)| {
                let percentage = if total > Decimal::ZERO {
                    (amount / total * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION)
                } else {
                    Decimal::ZERO
                };
                CategoryBreakdown {
                    category,
                    amount: amount.round_dp(DISPLAY_DECIMAL_PRECISION),
                    percentage,
                }
            })
            .collect();

        breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
        breakdown
    }

    fn income_rows(&self, owner_id: &str, month_start: NaiveDate) -> Result<Vec<MonthlyRow>> {
        Ok(self
            .income_repository
            .get_all(owner_id)?
            .into_iter()
            .filter(|income| income.is_active_for_month(month_start))
            .map(|income| MonthlyRow {
                category: income.category.clone(),
                amount: income.monthly_amount(),
                currency: income.amount.currency,
            })
            .collect())
    }

    fn expense_rows(&self, owner_id: &str, month_start: NaiveDate) -> Result<Vec<MonthlyRow>> {
        Ok(self
            .expense_repository
            .get_all(owner_id)?
            .into_iter()
            .filter(|expense| expense.is_active_for_month(month_start))
            .map(|expense| MonthlyRow {
                category: expense.category.clone(),
                amount: expense.monthly_amount(),
                currency: expense.amount.currency,
            })
            .collect())
    }

    async fn project<F>(&self, reporting: &str, rows_for_month: F) -> Result<Vec<MonthlyProjection>>
    where
        F: Fn(NaiveDate) -> Result<Vec<MonthlyRow>>,
    {
        let start = Self::current_month_start();
        let mut projections = Vec::with_capacity(PROJECTION_MONTHS as usize);

        for offset in 0..PROJECTION_MONTHS {
            let month = start
                .checked_add_months(Months::new(offset))
                .unwrap_or(start);
            let (total, _) = self.reduce_rows(rows_for_month(month)?, reporting).await;
            projections.push(MonthlyProjection {
                month,
                amount: total.round_dp(DISPLAY_DECIMAL_PRECISION),
            });
        }

        Ok(projections)
    }
}

#[async_trait]
impl CashflowServiceTrait for CashflowService {
    async fn get_monthly_income(&self, owner_id: &str, reporting_currency: &str) -> Result<Money> {
        debug!("Computing monthly income for {}", owner_id);
        let rows = self.income_rows(owner_id, Self::current_month_start())?;
        let (total, _) = self.reduce_rows(rows, reporting_currency).await;
        Ok(Money::new(
            total.round_dp(DISPLAY_DECIMAL_PRECISION),
            normalize_currency_code(reporting_currency),
        ))
    }

    async fn get_monthly_expenses(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Money> {
        debug!("Computing monthly expenses for {}", owner_id);
        let rows = self.expense_rows(owner_id, Self::current_month_start())?;
        let (total, _) = self.reduce_rows(rows, reporting_currency).await;
        Ok(Money::new(
            total.round_dp(DISPLAY_DECIMAL_PRECISION),
            normalize_currency_code(reporting_currency),
        ))
    }

    async fn get_income_breakdown(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<CategoryBreakdown>> {
        let rows = self.income_rows(owner_id, Self::current_month_start())?;
        let (total, by_category) = self.reduce_rows(rows, reporting_currency).await;
        Ok(Self::build_breakdown(total, by_category))
    }

    async fn get_expense_breakdown(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<CategoryBreakdown>> {
        let rows = self.expense_rows(owner_id, Self::current_month_start())?;
        let (total, by_category) = self.reduce_rows(rows, reporting_currency).await;
        Ok(Self::build_breakdown(total, by_category))
    }

    async fn get_income_projections(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<MonthlyProjection>> {
        self.project(reporting_currency, |month| self.income_rows(owner_id, month))
            .await
    }

    async fn get_expense_projections(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<MonthlyProjection>> {
        self.project(reporting_currency, |month| {
            self.expense_rows(owner_id, month)
        })
        .await
    }

    async fn get_monthly_loan_payments(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Money> {
        let mut monthly_payments = Decimal::ZERO;
        for loan in self.loan_repository.get_all(owner_id)? {
            if loan.current_balance.amount <= Decimal::ZERO {
                continue;
            }
            monthly_payments += self
                .to_reporting(
                    loan.monthly_payment.amount,
                    &loan.monthly_payment.currency,
                    reporting_currency,
                )
                .await;
        }

        Ok(Money::new(
            monthly_payments.round_dp(DISPLAY_DECIMAL_PRECISION),
            normalize_currency_code(reporting_currency),
        ))
    }

    async fn get_debt_to_income_ratio(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Decimal> {
        let income_rows = self.income_rows(owner_id, Self::current_month_start())?;
        let (monthly_income, _) = self.reduce_rows(income_rows, reporting_currency).await;

        if monthly_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let monthly_payments = self
            .get_monthly_loan_payments(owner_id, reporting_currency)
            .await?
            .amount;

        Ok((monthly_payments / monthly_income * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION))
    }
}
