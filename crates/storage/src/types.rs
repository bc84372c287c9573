//! Storage types shared across modules

use chatlist_core::{ModelId, PromptId};
use serde::{Deserialize, Serialize};

/// Row counts across the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageStats {
    pub prompt_count: u64,
    pub model_count: u64,
    pub active_model_count: u64,
    pub result_count: u64,
    pub selected_result_count: u64,
    /// Results whose generating model has been deleted.
    pub orphaned_result_count: u64,
    pub setting_count: u64,
}

/// Generic paginated result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, offset: u64, limit: u64) -> Self {
        Self { items, total, offset, limit }
    }

    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len() as u64) < self.total
    }
}

/// Prompt search criteria. Empty criteria match every prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptFilter {
    /// Substring of the prompt text; case is ignored for ASCII letters only.
    pub text: Option<String>,
    /// Exact label that must appear in the tag set.
    pub tag: Option<String>,
}

/// Result listing criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFilter {
    pub prompt_id: Option<PromptId>,
    pub model_id: Option<ModelId>,
    pub selected_only: bool,
}
