//! Settings domain models.

use crate::constants::DEFAULT_REPORTING_CURRENCY;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

/// Per-user preferences that shape reporting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub owner_id: String,
    /// The reporting currency all aggregates are expressed in.
    pub primary_currency: String,
    pub risk_tolerance: RiskTolerance,
}

impl UserPreferences {
    /// Preferences for a user with nothing stored yet.
    pub fn default_for(owner_id: &str) -> Self {
        UserPreferences {
            owner_id: owner_id.to_string(),
            primary_currency: DEFAULT_REPORTING_CURRENCY.to_string(),
            risk_tolerance: RiskTolerance::Moderate,
        }
    }
}
