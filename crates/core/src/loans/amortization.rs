//! Payment-by-payment amortization calculator.
//!
//! Pure functions over a [`Loan`]: no I/O, no shared state. The loop
//! carries two guards so it always terminates: a non-convergence stop
//! when the payment no longer covers accrued interest, and a hard cap
//! of `min(term_months, 720)` entries for pathological long-term inputs.

use super::loans_model::{AmortizationEntry, Loan};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, MAX_SCHEDULE_MONTHS, PAID_OFF_EPSILON};
use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Advances a payment date by one calendar month, clamping the day when
/// the target month is shorter (Jan 31 -> Feb 28).
pub fn next_payment_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

/// Generates the full amortization schedule for a loan.
///
/// Returns an empty schedule for a paid-off loan or a non-positive
/// monthly payment; these are ordinary states, not errors. A zero
/// interest rate is valid and yields principal-only entries.
pub fn generate_schedule(loan: &Loan) -> Vec<AmortizationEntry> {
    if loan.current_balance.amount <= Decimal::ZERO || loan.monthly_payment.amount <= Decimal::ZERO
    {
        return Vec::new();
    }

    let monthly_rate = loan.interest_rate / dec!(100) / dec!(12);
    let cap = loan.term_months.min(MAX_SCHEDULE_MONTHS);

    let mut schedule = Vec::new();
    let mut balance = loan.current_balance.amount;
    let mut payment_date = loan.next_payment_date;

    for payment_number in 1..=cap {
        let interest_payment = (balance * monthly_rate).round_dp(DISPLAY_DECIMAL_PRECISION);
        let principal_payment = (loan.monthly_payment.amount - interest_payment).min(balance);

        // Payment does not cover interest: stop rather than looping
        // forever or ballooning the balance.
        if principal_payment <= Decimal::ZERO {
            break;
        }

        balance = (balance - principal_payment).round_dp(DISPLAY_DECIMAL_PRECISION);

        schedule.push(AmortizationEntry {
            payment_number,
            payment_date,
            principal_payment: principal_payment.round_dp(DISPLAY_DECIMAL_PRECISION),
            interest_payment,
            remaining_balance: balance,
        });

        if balance <= PAID_OFF_EPSILON {
            break;
        }

        payment_date = next_payment_month(payment_date);
    }

    schedule
}

/// Total interest paid across the loan's schedule. Zero for a paid-off
/// or non-amortizing loan.
pub fn total_interest(loan: &Loan) -> Decimal {
    generate_schedule(loan)
        .iter()
        .map(|entry| entry.interest_payment)
        .sum()
}

/// Date of the final scheduled payment, or today when the schedule is
/// empty (already paid off, or the payment never amortizes).
pub fn payoff_date(loan: &Loan) -> NaiveDate {
    generate_schedule(loan)
        .last()
        .map(|entry| entry.payment_date)
        .unwrap_or_else(|| Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::Money;
    use crate::loans::LoanKind;
    use proptest::prelude::*;

    fn make_loan(
        balance: Decimal,
        interest_rate: Decimal,
        term_months: u32,
        monthly_payment: Decimal,
    ) -> Loan {
        Loan {
            id: "loan-1".to_string(),
            owner_id: "user-1".to_string(),
            kind: LoanKind::Personal,
            principal: Money::new(balance, "USD"),
            current_balance: Money::new(balance, "USD"),
            interest_rate,
            term_months,
            monthly_payment: Money::new(monthly_payment, "USD"),
            start_date: NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
            next_payment_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        }
    }

    #[test]
    fn test_car_loan_amortizes_to_zero() {
        let loan = make_loan(dec!(20000), dec!(5.5), 60, dec!(478.66));
        let schedule = generate_schedule(&loan);

        assert!(!schedule.is_empty());

        let first = &schedule[0];
        // 20000 * 5.5% / 12
        assert_eq!(first.interest_payment, dec!(91.67));
        assert_eq!(first.principal_payment, dec!(386.99));
        assert_eq!(
            first.payment_date,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );

        let last = schedule.last().unwrap();
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert!(schedule.len() <= 60);

        // Interest share shrinks as the balance declines.
        assert!(last.interest_payment < first.interest_payment);
    }

    #[test]
    fn test_balance_is_monotonically_non_increasing() {
        let loan = make_loan(dec!(20000), dec!(5.5), 60, dec!(478.66));
        let schedule = generate_schedule(&loan);

        let mut previous = loan.current_balance.amount;
        for entry in &schedule {
            assert!(entry.remaining_balance <= previous);
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn test_zero_interest_is_principal_only() {
        let loan = make_loan(dec!(1200), Decimal::ZERO, 12, dec!(100));
        let schedule = generate_schedule(&loan);

        assert_eq!(schedule.len(), 12);
        for entry in &schedule {
            assert_eq!(entry.interest_payment, Decimal::ZERO);
            assert!(entry.principal_payment > Decimal::ZERO);
        }
        assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_payment_below_interest_stops_instead_of_looping() {
        // 20000 at 12% accrues 200/month; a 150 payment never amortizes.
        let loan = make_loan(dec!(20000), dec!(12), 360, dec!(150));
        let schedule = generate_schedule(&loan);

        assert!(schedule.is_empty());
        assert_eq!(total_interest(&loan), Decimal::ZERO);
        assert_eq!(payoff_date(&loan), Utc::now().date_naive());
    }

    #[test]
    fn test_term_caps_schedule_length() {
        // Never pays off at 0% with a tiny payment: runs to the term cap.
        let loan = make_loan(dec!(100000), Decimal::ZERO, 500, dec!(10));
        assert_eq!(generate_schedule(&loan).len(), 500);

        let long_loan = make_loan(dec!(100000), Decimal::ZERO, 10_000, dec!(10));
        assert_eq!(generate_schedule(&long_loan).len(), 720);
    }

    #[test]
    fn test_paid_off_and_invalid_loans_yield_empty_schedules() {
        let paid_off = make_loan(Decimal::ZERO, dec!(5), 60, dec!(100));
        assert!(generate_schedule(&paid_off).is_empty());

        let no_payment = make_loan(dec!(5000), dec!(5), 60, Decimal::ZERO);
        assert!(generate_schedule(&no_payment).is_empty());
    }

    #[test]
    fn test_payment_dates_advance_by_calendar_month() {
        let mut loan = make_loan(dec!(300), Decimal::ZERO, 12, dec!(100));
        loan.next_payment_date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();

        let schedule = generate_schedule(&loan);
        let dates: Vec<NaiveDate> = schedule.iter().map(|e| e.payment_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 29).unwrap(),
            ]
        );
    }

    proptest! {
        /// Any well-formed loan yields a finite, monotone schedule, and
        /// whenever the loop wasn't stopped by the coverage guard the
        /// final balance is zero.
        #[test]
        fn prop_schedule_terminates_and_balance_never_increases(
            balance in 1u32..100_000,
            rate_tenths in 0u32..300,
            payment in 1u32..5_000,
            term in 1u32..120,
        ) {
            let loan = make_loan(
                Decimal::from(balance),
                Decimal::from(rate_tenths) / dec!(10),
                term,
                Decimal::from(payment),
            );
            let schedule = generate_schedule(&loan);

            prop_assert!(schedule.len() as u32 <= term.min(720));

            let mut previous = loan.current_balance.amount;
            for entry in &schedule {
                prop_assert!(entry.interest_payment >= Decimal::ZERO);
                prop_assert!(entry.principal_payment > Decimal::ZERO);
                prop_assert!(entry.remaining_balance >= Decimal::ZERO);
                prop_assert!(entry.remaining_balance <= previous);
                previous = entry.remaining_balance;
            }
        }
    }
}
