use super::settings_traits::{PreferencesRepositoryTrait, SettingsServiceTrait};
use crate::errors::Result;
use crate::fx::normalize_currency_code;
use crate::settings::UserPreferences;
use std::sync::Arc;

pub struct SettingsService {
    repository: Arc<dyn PreferencesRepositoryTrait>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn PreferencesRepositoryTrait>) -> Self {
        SettingsService { repository }
    }
}

impl SettingsServiceTrait for SettingsService {
    fn get_preferences(&self, owner_id: &str) -> Result<UserPreferences> {
        Ok(self
            .repository
            .get_preferences(owner_id)?
            .unwrap_or_else(|| UserPreferences::default_for(owner_id)))
    }

    fn get_primary_currency(&self, owner_id: &str) -> Result<String> {
        let preferences = self.get_preferences(owner_id)?;
        Ok(normalize_currency_code(&preferences.primary_currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RiskTolerance;

    struct MockPreferencesRepository {
        stored: Option<UserPreferences>,
    }

    impl PreferencesRepositoryTrait for MockPreferencesRepository {
        fn get_preferences(&self, _owner_id: &str) -> Result<Option<UserPreferences>> {
            Ok(self.stored.clone())
        }
    }

    #[test]
    fn test_missing_preferences_default_to_usd_moderate() {
        let service = SettingsService::new(Arc::new(MockPreferencesRepository { stored: None }));

        let preferences = service.get_preferences("user-1").unwrap();
        assert_eq!(preferences.primary_currency, "USD");
        assert_eq!(preferences.risk_tolerance, RiskTolerance::Moderate);
        assert_eq!(service.get_primary_currency("user-1").unwrap(), "USD");
    }

    #[test]
    fn test_stored_currency_is_normalized() {
        let service = SettingsService::new(Arc::new(MockPreferencesRepository {
            stored: Some(UserPreferences {
                owner_id: "user-1".to_string(),
                primary_currency: " eur ".to_string(),
                risk_tolerance: RiskTolerance::Aggressive,
            }),
        }));

        assert_eq!(service.get_primary_currency("user-1").unwrap(), "EUR");
    }
}
