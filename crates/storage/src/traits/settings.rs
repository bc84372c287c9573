use async_trait::async_trait;
use chatlist_core::Setting;

use crate::error::StorageError;

/// Key/value settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Value stored under `key`.
    async fn get_setting(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    async fn put_setting(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// All settings ordered by key.
    async fn list_settings(&self) -> Result<Vec<Setting>, StorageError>;
}
