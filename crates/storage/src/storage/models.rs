use chatlist_core::{Model, ModelId, ModelInput};
use rusqlite::{OptionalExtension as _, TransactionBehavior, params};

use super::{Storage, escape_like_pattern, get_conn};
use crate::error::StorageError;

const MODEL_COLUMNS: &str = "id, name, api_url, api_id, is_active";

impl Storage {
    /// Insert a model (`id == None`) or replace the fields of an existing one.
    ///
    /// # Errors
    /// `Conflict` if `input.name` belongs to another model, `NotFound` if `id`
    /// is given but absent, `Validation` for blank fields.
    pub fn upsert_model(&self, id: Option<ModelId>, input: &ModelInput) -> Result<Model, StorageError> {
        let input = input.validated()?;

        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let name_owner: Option<i64> = tx
            .query_row("SELECT id FROM models WHERE name = ?1", params![input.name], |row| row.get(0))
            .optional()?;
        if let Some(owner) = name_owner.filter(|owner| id.is_none_or(|id| id.0 != *owner)) {
            return Err(StorageError::Conflict(format!(
                "model name '{}' is already used by model {owner}",
                input.name
            )));
        }

        let id = match id {
            None => {
                tx.execute(
                    "INSERT INTO models (name, api_url, api_id, is_active) VALUES (?1, ?2, ?3, ?4)",
                    params![input.name, input.api_url, input.api_id, input.is_active],
                )?;
                ModelId(tx.last_insert_rowid())
            },
            Some(id) => {
                let updated = tx.execute(
                    "UPDATE models SET name = ?1, api_url = ?2, api_id = ?3, is_active = ?4 WHERE id = ?5",
                    params![input.name, input.api_url, input.api_id, input.is_active, id.0],
                )?;
                if updated == 0 {
                    return Err(StorageError::not_found("model", id));
                }
                id
            },
        };
        tx.commit()?;

        tracing::debug!(model_id = %id, name = %input.name, "Model saved");
        Ok(Model::new(id, input.name, input.api_url, input.api_id, input.is_active))
    }

    /// Get model by ID.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_model(&self, id: ModelId) -> Result<Option<Model>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let model = conn
            .query_row(
                &format!("SELECT {MODEL_COLUMNS} FROM models WHERE id = ?1"),
                params![id.0],
                Self::row_to_model,
            )
            .optional()?;
        Ok(model)
    }

    /// All models ordered by name, optionally filtered by a name substring.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_models(&self, search: Option<&str>) -> Result<Vec<Model>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let models = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(search) => {
                let pattern = format!("%{}%", escape_like_pattern(search));
                let mut stmt = conn.prepare(&format!(
                    r"SELECT {MODEL_COLUMNS} FROM models WHERE name LIKE ?1 ESCAPE '\' ORDER BY name ASC"
                ))?;
                stmt.query_map(params![pattern], Self::row_to_model)?.collect::<rusqlite::Result<Vec<_>>>()?
            },
            None => {
                let mut stmt =
                    conn.prepare(&format!("SELECT {MODEL_COLUMNS} FROM models ORDER BY name ASC"))?;
                stmt.query_map([], Self::row_to_model)?.collect::<rusqlite::Result<Vec<_>>>()?
            },
        };
        Ok(models)
    }

    /// Models offered for new requests, ordered by name.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_active_models(&self) -> Result<Vec<Model>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {MODEL_COLUMNS} FROM models WHERE is_active = 1 ORDER BY name ASC"
        ))?;
        let models = stmt.query_map([], Self::row_to_model)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(models)
    }

    /// Turn a model on or off for new requests.
    ///
    /// # Errors
    /// `NotFound` if the model does not exist.
    pub fn set_model_active(&self, id: ModelId, active: bool) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let updated =
            conn.execute("UPDATE models SET is_active = ?1 WHERE id = ?2", params![active, id.0])?;
        if updated == 0 {
            return Err(StorageError::not_found("model", id));
        }
        Ok(())
    }

    /// Delete a model, keeping its results with a cleared model reference.
    ///
    /// Returns the number of results orphaned.
    ///
    /// # Errors
    /// `NotFound` if the model does not exist; nothing changes in that case.
    pub fn delete_model(&self, id: ModelId) -> Result<usize, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let orphaned = tx.execute("UPDATE results SET model_id = NULL WHERE model_id = ?1", params![id.0])?;
        let removed = tx.execute("DELETE FROM models WHERE id = ?1", params![id.0])?;
        if removed == 0 {
            return Err(StorageError::not_found("model", id));
        }
        tx.commit()?;

        tracing::debug!(model_id = %id, orphaned, "Model deleted");
        Ok(orphaned)
    }

    pub(crate) fn model_exists(conn: &rusqlite::Connection, id: ModelId) -> rusqlite::Result<bool> {
        conn.query_row("SELECT EXISTS(SELECT 1 FROM models WHERE id = ?1)", params![id.0], |row| row.get(0))
    }

    fn row_to_model(row: &rusqlite::Row<'_>) -> rusqlite::Result<Model> {
        Ok(Model::new(ModelId(row.get(0)?), row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
    }
}
