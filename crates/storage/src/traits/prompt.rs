use async_trait::async_trait;
use chatlist_core::{Prompt, PromptId};

use crate::error::StorageError;
use crate::types::{PaginatedResult, PromptFilter};

/// Prompt operations.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Create a prompt stamped with the current time.
    async fn create_prompt(&self, text: &str, tags: Option<&str>) -> Result<Prompt, StorageError>;

    /// Get prompt by ID.
    async fn get_prompt(&self, id: PromptId) -> Result<Option<Prompt>, StorageError>;

    /// Delete a prompt and its results. Returns the number of results removed.
    async fn delete_prompt(&self, id: PromptId) -> Result<usize, StorageError>;

    /// All prompts, newest first.
    async fn list_prompts_by_date_desc(&self) -> Result<Vec<Prompt>, StorageError>;

    /// Get prompts with pagination.
    async fn list_prompts_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<Prompt>, StorageError>;

    /// Search prompts by text and tag.
    async fn search_prompts(&self, filter: &PromptFilter) -> Result<Vec<Prompt>, StorageError>;
}
