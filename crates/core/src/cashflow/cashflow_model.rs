//! Cashflow domain models.

use crate::fx::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Payment frequency of a recurring cashflow entity.
///
/// Frequencies outside the recognized set deserialize to `Other` and
/// are treated as already-monthly. One policy for income and expenses;
/// nothing is silently dropped.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Frequency {
    Daily,
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    Annually,
    #[serde(other)]
    Other,
}

impl Frequency {
    /// Multiplier that converts one occurrence into a monthly-equivalent
    /// amount.
    pub fn monthly_multiplier(&self) -> Decimal {
        match self {
            // Average days per month over the 400-year Gregorian cycle.
            Frequency::Daily => dec!(30.44),
            Frequency::Weekly => dec!(52) / dec!(12),
            Frequency::BiWeekly => dec!(2.17),
            Frequency::Monthly => Decimal::ONE,
            Frequency::Quarterly => Decimal::ONE / dec!(3),
            Frequency::Annually => Decimal::ONE / dec!(12),
            Frequency::Other => Decimal::ONE,
        }
    }
}

/// Returns true when a recurring entity's `[start, end]` window covers
/// the month beginning at `month_start`. The end date is inclusive: an
/// entity ending on a month's first day still contributes that month.
fn window_covers(start_date: NaiveDate, end_date: Option<NaiveDate>, month_start: NaiveDate) -> bool {
    start_date <= month_start && end_date.map_or(true, |end| end >= month_start)
}

/// A recurring income stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub owner_id: String,
    /// Where the income comes from, e.g. "salary" or "dividends".
    pub category: String,
    pub amount: Money,
    pub frequency: Frequency,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Income {
    /// An income contributes to a month iff it is active and the month's
    /// first day falls inside its date window.
    pub fn is_active_for_month(&self, month_start: NaiveDate) -> bool {
        self.is_active && window_covers(self.start_date, self.end_date, month_start)
    }

    pub fn monthly_amount(&self) -> Decimal {
        self.amount.amount * self.frequency.monthly_multiplier()
    }
}

/// A recurring expense.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub owner_id: String,
    pub category: String,
    pub amount: Money,
    pub frequency: Frequency,
    /// Fixed expenses recur every covered month; non-fixed records are
    /// one-off and excluded from recurring aggregates.
    pub is_fixed: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl Expense {
    pub fn is_active_for_month(&self, month_start: NaiveDate) -> bool {
        self.is_fixed && window_covers(self.start_date, self.end_date, month_start)
    }

    pub fn monthly_amount(&self) -> Decimal {
        self.amount.amount * self.frequency.monthly_multiplier()
    }
}

/// Per-category slice of a monthly aggregate, in the reporting currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Projected monthly total for one future month.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjection {
    /// First day of the projected month.
    pub month: NaiveDate,
    pub amount: Decimal,
}
