//! Investment holdings and portfolio summary.

mod investments_model;
mod investments_service;
mod investments_traits;

pub use investments_model::*;
pub use investments_service::*;
pub use investments_traits::*;
