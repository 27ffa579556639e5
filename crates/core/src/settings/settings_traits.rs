//! Repository and service traits for settings.

use crate::errors::Result;
use crate::settings::UserPreferences;

/// Repository trait for stored user preferences.
pub trait PreferencesRepositoryTrait: Send + Sync {
    /// Returns the stored preferences, or `None` when the user has
    /// never saved any.
    fn get_preferences(&self, owner_id: &str) -> Result<Option<UserPreferences>>;
}

/// Trait for settings service operations.
pub trait SettingsServiceTrait: Send + Sync {
    fn get_preferences(&self, owner_id: &str) -> Result<UserPreferences>;

    /// The user's reporting currency, defaulting to USD when no
    /// preference is stored.
    fn get_primary_currency(&self, owner_id: &str) -> Result<String>;
}
