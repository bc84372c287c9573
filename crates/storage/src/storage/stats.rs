use super::{Storage, get_conn};
use crate::error::StorageError;
use crate::types::StorageStats;

impl Storage {
    /// Get storage statistics.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count = |sql: &str| -> Result<u64, StorageError> {
            let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
            Ok(n as u64)
        };
        Ok(StorageStats {
            prompt_count: count("SELECT COUNT(*) FROM prompts")?,
            model_count: count("SELECT COUNT(*) FROM models")?,
            active_model_count: count("SELECT COUNT(*) FROM models WHERE is_active = 1")?,
            result_count: count("SELECT COUNT(*) FROM results")?,
            selected_result_count: count("SELECT COUNT(*) FROM results WHERE selected = 1")?,
            orphaned_result_count: count("SELECT COUNT(*) FROM results WHERE model_id IS NULL")?,
            setting_count: count("SELECT COUNT(*) FROM settings")?,
        })
    }
}
