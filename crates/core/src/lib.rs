//! Ledgerline Core - Domain entities, services, and traits.
//!
//! This crate contains the multi-currency business logic for Ledgerline:
//! loan amortization and debt-payoff scheduling, income/expense/investment
//! aggregation into a single reporting currency, and portfolio risk
//! analysis. It is storage-agnostic and defines repository traits that
//! are implemented by the persistence layer.

pub mod cashflow;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod loans;
pub mod portfolio;
pub mod settings;

// Re-export common types from the fx and portfolio modules
pub use fx::{Converted, ExchangeRate, Money, RateSource};
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
