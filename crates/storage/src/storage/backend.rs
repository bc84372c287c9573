//! Async trait implementations for `Storage`.
//!
//! Each call clones the pool handle into `spawn_blocking` so SQLite work never
//! runs on the async executor.

use async_trait::async_trait;
use chatlist_core::{
    Model, ModelId, ModelInput, NewResult, Prompt, PromptId, PromptResult, ResultId, Setting,
};

use super::Storage;
use crate::error::StorageError;
use crate::traits::{ModelStore, PromptStore, ResultStore, SettingsStore, StatsStore};
use crate::types::{PaginatedResult, PromptFilter, ResultFilter, StorageStats};

#[async_trait]
impl PromptStore for Storage {
    async fn create_prompt(&self, text: &str, tags: Option<&str>) -> Result<Prompt, StorageError> {
        let storage = self.clone();
        let text = text.to_owned();
        let tags = tags.map(str::to_owned);
        tokio::task::spawn_blocking(move || storage.create_prompt(&text, tags.as_deref())).await?
    }

    async fn get_prompt(&self, id: PromptId) -> Result<Option<Prompt>, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.get_prompt(id)).await?
    }

    async fn delete_prompt(&self, id: PromptId) -> Result<usize, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.delete_prompt(id)).await?
    }

    async fn list_prompts_by_date_desc(&self) -> Result<Vec<Prompt>, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.list_prompts_by_date_desc()).await?
    }

    async fn list_prompts_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<Prompt>, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.list_prompts_paginated(offset, limit)).await?
    }

    async fn search_prompts(&self, filter: &PromptFilter) -> Result<Vec<Prompt>, StorageError> {
        let storage = self.clone();
        let filter = filter.clone();
        tokio::task::spawn_blocking(move || storage.search_prompts(&filter)).await?
    }
}

#[async_trait]
impl ModelStore for Storage {
    async fn upsert_model(&self, id: Option<ModelId>, input: &ModelInput) -> Result<Model, StorageError> {
        let storage = self.clone();
        let input = input.clone();
        tokio::task::spawn_blocking(move || storage.upsert_model(id, &input)).await?
    }

    async fn get_model(&self, id: ModelId) -> Result<Option<Model>, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.get_model(id)).await?
    }

    async fn delete_model(&self, id: ModelId) -> Result<usize, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.delete_model(id)).await?
    }

    async fn list_models(&self, search: Option<&str>) -> Result<Vec<Model>, StorageError> {
        let storage = self.clone();
        let search = search.map(str::to_owned);
        tokio::task::spawn_blocking(move || storage.list_models(search.as_deref())).await?
    }

    async fn list_active_models(&self) -> Result<Vec<Model>, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.list_active_models()).await?
    }

    async fn set_model_active(&self, id: ModelId, active: bool) -> Result<(), StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.set_model_active(id, active)).await?
    }
}

#[async_trait]
impl ResultStore for Storage {
    async fn record_result(&self, new: &NewResult) -> Result<PromptResult, StorageError> {
        let storage = self.clone();
        let new = new.clone();
        tokio::task::spawn_blocking(move || storage.record_result(&new)).await?
    }

    async fn record_results(&self, batch: &[NewResult]) -> Result<Vec<PromptResult>, StorageError> {
        let storage = self.clone();
        let batch = batch.to_vec();
        tokio::task::spawn_blocking(move || storage.record_results(&batch)).await?
    }

    async fn set_selected(&self, id: ResultId, selected: bool) -> Result<(), StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.set_selected(id, selected)).await?
    }

    async fn get_result(&self, id: ResultId) -> Result<Option<PromptResult>, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.get_result(id)).await?
    }

    async fn list_results_for_prompt(&self, prompt_id: PromptId) -> Result<Vec<PromptResult>, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.list_results_for_prompt(prompt_id)).await?
    }

    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<PromptResult>, StorageError> {
        let storage = self.clone();
        let filter = *filter;
        tokio::task::spawn_blocking(move || storage.list_results(&filter)).await?
    }
}

#[async_trait]
impl SettingsStore for Storage {
    async fn get_setting(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.clone();
        let key = key.to_owned();
        tokio::task::spawn_blocking(move || storage.get_setting(&key)).await?
    }

    async fn put_setting(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.clone();
        let key = key.to_owned();
        let value = value.to_owned();
        tokio::task::spawn_blocking(move || storage.put_setting(&key, &value)).await?
    }

    async fn list_settings(&self) -> Result<Vec<Setting>, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.list_settings()).await?
    }
}

#[async_trait]
impl StatsStore for Storage {
    async fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.get_stats()).await?
    }
}
