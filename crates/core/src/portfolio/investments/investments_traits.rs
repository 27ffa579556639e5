use super::investments_model::{Investment, PortfolioSummary, TypeAllocation};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for investment repository operations.
pub trait InvestmentRepositoryTrait: Send + Sync {
    fn get_all(&self, owner_id: &str) -> Result<Vec<Investment>>;
}

/// Trait for portfolio summary operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    async fn get_portfolio_summary(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<PortfolioSummary>;

    /// Portfolio value broken down by investment type, sorted
    /// descending by value. Percentages are 0 for an empty portfolio.
    async fn get_type_allocations(
        &self,
        owner_id: &str,
        reporting_currency: &str,
    ) -> Result<Vec<TypeAllocation>>;
}
