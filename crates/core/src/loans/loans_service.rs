use super::amortization;
use super::loans_model::{
    AmortizationEntry, DebtPayoffStrategies, Loan, PayoffOrdering, PayoffStrategy,
};
use super::loans_traits::{LoanRepositoryTrait, LoanServiceTrait};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct LoanService {
    repository: Arc<dyn LoanRepositoryTrait>,
}

impl LoanService {
    pub fn new(repository: Arc<dyn LoanRepositoryTrait>) -> Self {
        LoanService { repository }
    }

    fn build_strategy(loans: &[Loan], ordering: PayoffOrdering) -> PayoffStrategy {
        let mut ordered: Vec<&Loan> = loans.iter().collect();
        match ordering {
            PayoffOrdering::Snowball => {
                ordered.sort_by(|a, b| a.current_balance.amount.cmp(&b.current_balance.amount));
            }
            PayoffOrdering::Avalanche => {
                ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));
            }
        }

        let total_interest: Decimal = ordered
            .iter()
            .map(|loan| amortization::total_interest(loan))
            .sum();

        let total_debt: Decimal = ordered.iter().map(|l| l.current_balance.amount).sum();
        let total_payments: Decimal = ordered.iter().map(|l| l.monthly_payment.amount).sum();

        let months_to_payoff = if total_debt > Decimal::ZERO && total_payments > Decimal::ZERO {
            (total_debt / total_payments)
                .ceil()
                .to_u32()
                .unwrap_or(u32::MAX)
        } else {
            0
        };

        PayoffStrategy {
            ordering,
            loan_order: ordered.iter().map(|l| l.id.clone()).collect(),
            total_interest,
            months_to_payoff,
        }
    }
}

#[async_trait]
impl LoanServiceTrait for LoanService {
    fn get_amortization_schedule(&self, loan: &Loan) -> Vec<AmortizationEntry> {
        amortization::generate_schedule(loan)
    }

    fn get_total_interest(&self, loan: &Loan) -> Decimal {
        amortization::total_interest(loan)
    }

    fn get_payoff_date(&self, loan: &Loan) -> NaiveDate {
        amortization::payoff_date(loan)
    }

    async fn get_debt_payoff_strategies(&self, owner_id: &str) -> Result<DebtPayoffStrategies> {
        debug!("Computing debt payoff strategies for {}", owner_id);

        let loans: Vec<Loan> = self
            .repository
            .get_all(owner_id)?
            .into_iter()
            .filter(|l| l.current_balance.amount > Decimal::ZERO)
            .collect();

        Ok(DebtPayoffStrategies {
            snowball: Self::build_strategy(&loans, PayoffOrdering::Snowball),
            avalanche: Self::build_strategy(&loans, PayoffOrdering::Avalanche),
        })
    }

    async fn make_payment(&self, owner_id: &str, loan_id: &str, amount: Decimal) -> Result<Loan> {
        let mut loan = self
            .repository
            .get_by_id(owner_id, loan_id)?
            .ok_or_else(|| Error::NotFound(format!("Loan {} not found", loan_id)))?;

        // Overpayment floors the balance at zero, never negative.
        loan.current_balance.amount = (loan.current_balance.amount - amount).max(Decimal::ZERO);
        loan.next_payment_date = amortization::next_payment_month(loan.next_payment_date);

        self.repository.update(loan).await
    }
}
