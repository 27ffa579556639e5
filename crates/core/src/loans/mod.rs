//! Loan amortization and debt payoff module.
//!
//! Provides the payment-by-payment amortization calculator and the loan
//! service that builds payoff strategies and applies payments.

pub mod amortization;
mod loans_model;
mod loans_service;
mod loans_traits;

pub use loans_model::*;
pub use loans_service::*;
pub use loans_traits::*;
