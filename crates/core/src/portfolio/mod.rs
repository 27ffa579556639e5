//! Portfolio module: investment valuation and currency risk.

pub mod investments;
pub mod risk;

pub use investments::*;
pub use risk::*;
