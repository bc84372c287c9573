use chatlist_core::{Setting, SettingKey};
use rusqlite::{OptionalExtension as _, params};

use super::{Storage, get_conn};
use crate::error::StorageError;

impl Storage {
    /// Value stored under `key`, `None` if the key is absent or its value is NULL.
    ///
    /// # Errors
    /// `Validation` for a blank key; `Database` if the query fails.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>, StorageError> {
        let key: SettingKey = key.parse()?;
        let conn = get_conn(&self.pool)?;
        let value: Option<Option<String>> = conn
            .query_row("SELECT value FROM settings WHERE key = ?1", params![key.as_str()], |row| row.get(0))
            .optional()?;
        Ok(value.flatten())
    }

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// The existing row is updated in place so its id stays stable.
    ///
    /// # Errors
    /// `Validation` for a blank key; `Database` if the upsert fails.
    pub fn put_setting(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let key: SettingKey = key.parse()?;
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key.as_str(), value],
        )?;
        if !key.is_known() {
            tracing::debug!(key = %key, "Stored unrecognised setting");
        }
        Ok(())
    }

    /// All settings ordered by key.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_settings(&self) -> Result<Vec<Setting>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare("SELECT id, key, value FROM settings ORDER BY key ASC")?;
        let settings = stmt
            .query_map([], |row| Ok(Setting { id: row.get(0)?, key: row.get(1)?, value: row.get(2)? }))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(settings)
    }
}
