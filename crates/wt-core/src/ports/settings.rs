use async_trait::async_trait;

use crate::ports::errors::SettingsError;
use crate::settings::Settings;

#[async_trait]
pub trait SettingsPort: Send + Sync {
    /// Load saved settings, falling back to `defaults` when nothing is saved.
    async fn load(&self, defaults: Settings) -> Result<Settings, SettingsError>;
    async fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}
