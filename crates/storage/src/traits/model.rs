use async_trait::async_trait;
use chatlist_core::{Model, ModelId, ModelInput};

use crate::error::StorageError;

/// Model configuration operations.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Insert (`id == None`) or update a model; names are unique.
    async fn upsert_model(&self, id: Option<ModelId>, input: &ModelInput) -> Result<Model, StorageError>;

    /// Get model by ID.
    async fn get_model(&self, id: ModelId) -> Result<Option<Model>, StorageError>;

    /// Delete a model, orphaning its results. Returns the number orphaned.
    async fn delete_model(&self, id: ModelId) -> Result<usize, StorageError>;

    /// All models by name, optionally filtered by a name substring.
    async fn list_models(&self, search: Option<&str>) -> Result<Vec<Model>, StorageError>;

    /// Models offered for new requests.
    async fn list_active_models(&self) -> Result<Vec<Model>, StorageError>;

    /// Toggle the activity flag.
    async fn set_model_active(&self, id: ModelId, active: bool) -> Result<(), StorageError>;
}
