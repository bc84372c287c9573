use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::StorageStats;

/// Store-wide statistics.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Row counts across the store.
    async fn get_stats(&self) -> Result<StorageStats, StorageError>;
}
