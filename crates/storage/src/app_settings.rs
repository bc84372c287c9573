//! Typed access to the recognised settings keys.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chatlist_core::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use chatlist_core::{PromptId, SettingKey, WindowGeometry, parse_request_timeout};

use crate::error::StorageError;
use crate::traits::SettingsStore;

/// Typed view over a [`SettingsStore`].
///
/// Holds no state of its own; every read goes back to the store.
#[derive(Debug)]
pub struct AppSettings<'a, S: SettingsStore> {
    store: &'a S,
}

impl<'a, S: SettingsStore> AppSettings<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    async fn get(&self, key: &SettingKey) -> Result<Option<String>, StorageError> {
        let value = self.store.get_setting(key.as_str()).await?;
        Ok(value.filter(|v| !v.trim().is_empty()))
    }

    /// Default export destination.
    pub async fn export_path(&self) -> Result<Option<PathBuf>, StorageError> {
        Ok(self.get(&SettingKey::ExportPath).await?.map(PathBuf::from))
    }

    pub async fn set_export_path(&self, path: &Path) -> Result<(), StorageError> {
        self.store.put_setting(SettingKey::ExportPath.as_str(), &path.to_string_lossy()).await
    }

    /// Model request timeout. Absent or unparsable values fall back to the default.
    pub async fn request_timeout(&self) -> Result<Duration, StorageError> {
        let default = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);
        let Some(raw) = self.get(&SettingKey::RequestTimeout).await? else {
            return Ok(default);
        };
        match parse_request_timeout(&raw) {
            Ok(timeout) => Ok(timeout),
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "invalid request_timeout setting, using default");
                Ok(default)
            },
        }
    }

    pub async fn set_request_timeout(&self, timeout: Duration) -> Result<(), StorageError> {
        let secs = timeout.as_secs();
        if secs == 0 {
            return Err(StorageError::Validation("request timeout must be at least one second".to_owned()));
        }
        self.store.put_setting(SettingKey::RequestTimeout.as_str(), &secs.to_string()).await
    }

    /// Saved window placement.
    ///
    /// # Errors
    /// `DataCorruption` if the stored JSON does not decode.
    pub async fn window_geometry(&self) -> Result<Option<WindowGeometry>, StorageError> {
        match self.get(&SettingKey::WindowGeometry).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn set_window_geometry(&self, geometry: &WindowGeometry) -> Result<(), StorageError> {
        let json = serde_json::to_string(geometry)?;
        self.store.put_setting(SettingKey::WindowGeometry.as_str(), &json).await
    }

    /// Prompt that was open when the application last closed.
    pub async fn last_prompt_id(&self) -> Result<Option<PromptId>, StorageError> {
        let Some(raw) = self.get(&SettingKey::LastPromptId).await? else {
            return Ok(None);
        };
        match raw.parse() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                tracing::warn!(value = %raw, "invalid last_prompt_id setting, ignoring");
                Ok(None)
            },
        }
    }

    pub async fn set_last_prompt_id(&self, id: PromptId) -> Result<(), StorageError> {
        self.store.put_setting(SettingKey::LastPromptId.as_str(), &id.to_string()).await
    }
}
