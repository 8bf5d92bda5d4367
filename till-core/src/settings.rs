//! Application settings singleton

use shared::models::AppSettings;

use crate::core::CoreResult;
use crate::store::Store;

pub struct SettingsManager {
    store: Store,
    settings: AppSettings,
}

impl SettingsManager {
    /// Load settings, falling back to defaults when nothing is stored.
    pub fn load(store: Store) -> CoreResult<Self> {
        let settings = store.get_settings()?;
        Ok(Self { store, settings })
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn update(&mut self, settings: AppSettings) -> CoreResult<()> {
        self.store.put_settings(&settings)?;
        self.settings = settings;
        Ok(())
    }
}
