//! Currency exposure and portfolio risk analysis.

mod risk_model;
mod risk_service;

pub use risk_model::*;
pub use risk_service::*;

#[cfg(test)]
mod risk_service_tests;
