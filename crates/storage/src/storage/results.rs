use chatlist_core::{ModelId, NewResult, PromptId, PromptResult, ResultId, format_timestamp};
use chrono::NaiveDateTime;
use rusqlite::{OptionalExtension as _, TransactionBehavior, params, params_from_iter};

use super::{Storage, get_conn, timestamp_column};
use crate::error::StorageError;
use crate::types::ResultFilter;

const RESULT_COLUMNS: &str = "id, prompt_id, model_id, response, selected, created_at";

impl Storage {
    /// Record one completed model call.
    ///
    /// A model reference that no longer resolves is stored as NULL, the same
    /// outcome as deleting the model afterwards.
    ///
    /// # Errors
    /// `Validation` if the prompt does not exist; no row is created.
    pub fn record_result(&self, new: &NewResult) -> Result<PromptResult, StorageError> {
        let mut recorded = self.record_results(std::slice::from_ref(new))?;
        recorded.pop().ok_or_else(|| StorageError::Validation("no result recorded".to_owned()))
    }

    /// Record several results in one transaction with a shared timestamp.
    ///
    /// # Errors
    /// `Validation` if any prompt reference is missing; the whole batch is
    /// rolled back.
    pub fn record_results(&self, batch: &[NewResult]) -> Result<Vec<PromptResult>, StorageError> {
        let created_at = self.now();
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut recorded = Vec::with_capacity(batch.len());
        for new in batch {
            recorded.push(Self::insert_result(&tx, new, created_at)?);
        }
        tx.commit()?;

        tracing::debug!(count = recorded.len(), "Results recorded");
        Ok(recorded)
    }

    fn insert_result(
        conn: &rusqlite::Connection,
        new: &NewResult,
        created_at: NaiveDateTime,
    ) -> Result<PromptResult, StorageError> {
        let prompt_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM prompts WHERE id = ?1)",
            params![new.prompt_id.0],
            |row| row.get(0),
        )?;
        if !prompt_exists {
            return Err(StorageError::Validation(format!("prompt {} does not exist", new.prompt_id)));
        }

        let model_id = match new.model_id {
            Some(model_id) if !Self::model_exists(conn, model_id)? => {
                tracing::warn!(
                    prompt_id = %new.prompt_id,
                    model_id = %model_id,
                    "Model no longer exists, recording result without model reference"
                );
                None
            },
            other => other,
        };

        conn.execute(
            "INSERT INTO results (prompt_id, model_id, response, selected, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.prompt_id.0,
                model_id.map(|m| m.0),
                new.response,
                new.selected,
                format_timestamp(&created_at),
            ],
        )?;

        Ok(PromptResult::new(
            ResultId(conn.last_insert_rowid()),
            new.prompt_id,
            model_id,
            new.response.clone(),
            new.selected,
            created_at,
        ))
    }

    /// Set the user's preferred-answer flag. Repeating the call is harmless.
    ///
    /// # Errors
    /// `NotFound` if the result does not exist.
    pub fn set_selected(&self, id: ResultId, selected: bool) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        let matched = conn.execute("UPDATE results SET selected = ?1 WHERE id = ?2", params![selected, id.0])?;
        if matched == 0 {
            return Err(StorageError::not_found("result", id));
        }
        Ok(())
    }

    /// Get result by ID.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_result(&self, id: ResultId) -> Result<Option<PromptResult>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let result = conn
            .query_row(
                &format!("SELECT {RESULT_COLUMNS} FROM results WHERE id = ?1"),
                params![id.0],
                Self::row_to_result,
            )
            .optional()?;
        Ok(result)
    }

    /// Results for one prompt in the order they were recorded.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_results_for_prompt(&self, prompt_id: PromptId) -> Result<Vec<PromptResult>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESULT_COLUMNS} FROM results WHERE prompt_id = ?1 ORDER BY created_at ASC, id ASC"
        ))?;
        let results = stmt
            .query_map(params![prompt_id.0], Self::row_to_result)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    /// Results matching `filter`, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_results(&self, filter: &ResultFilter) -> Result<Vec<PromptResult>, StorageError> {
        let mut clauses: Vec<String> = Vec::new();
        let mut args: Vec<i64> = Vec::new();

        if let Some(prompt_id) = filter.prompt_id {
            args.push(prompt_id.0);
            clauses.push(format!("prompt_id = ?{}", args.len()));
        }
        if let Some(model_id) = filter.model_id {
            args.push(model_id.0);
            clauses.push(format!("model_id = ?{}", args.len()));
        }
        if filter.selected_only {
            clauses.push("selected = 1".to_owned());
        }

        let where_clause =
            if clauses.is_empty() { String::new() } else { format!("WHERE {}", clauses.join(" AND ")) };
        let sql =
            format!("SELECT {RESULT_COLUMNS} FROM results {where_clause} ORDER BY created_at DESC, id DESC");

        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&sql)?;
        let results = stmt
            .query_map(params_from_iter(args.iter()), Self::row_to_result)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(results)
    }

    fn row_to_result(row: &rusqlite::Row<'_>) -> rusqlite::Result<PromptResult> {
        Ok(PromptResult::new(
            ResultId(row.get(0)?),
            PromptId(row.get(1)?),
            row.get::<_, Option<i64>>(2)?.map(ModelId),
            row.get(3)?,
            row.get(4)?,
            timestamp_column(row, 5)?,
        ))
    }
}
