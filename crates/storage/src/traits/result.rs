use async_trait::async_trait;
use chatlist_core::{NewResult, PromptId, PromptResult, ResultId};

use crate::error::StorageError;
use crate::types::ResultFilter;

/// Model result operations.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Record one completed model call.
    async fn record_result(&self, new: &NewResult) -> Result<PromptResult, StorageError>;

    /// Record several results atomically.
    async fn record_results(&self, batch: &[NewResult]) -> Result<Vec<PromptResult>, StorageError>;

    /// Set or clear the selection flag.
    async fn set_selected(&self, id: ResultId, selected: bool) -> Result<(), StorageError>;

    /// Get result by ID.
    async fn get_result(&self, id: ResultId) -> Result<Option<PromptResult>, StorageError>;

    /// Results for one prompt in recording order.
    async fn list_results_for_prompt(&self, prompt_id: PromptId) -> Result<Vec<PromptResult>, StorageError>;

    /// Results matching a filter, newest first.
    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<PromptResult>, StorageError>;
}
