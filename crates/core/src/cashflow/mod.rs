//! Cashflow module: recurring income and expense aggregation.
//!
//! Normalizes entities of any payment frequency to monthly-equivalent
//! amounts, converts them into the reporting currency, and reduces them
//! to totals, category breakdowns, and 12-month projections.

mod cashflow_model;
mod cashflow_service;
mod cashflow_traits;

pub use cashflow_model::*;
pub use cashflow_service::*;
pub use cashflow_traits::*;
