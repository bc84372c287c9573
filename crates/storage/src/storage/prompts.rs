use chatlist_core::{Prompt, PromptId, format_timestamp, normalize_tags, validate_prompt_text};
use rusqlite::{OptionalExtension as _, TransactionBehavior, params, params_from_iter};

use super::{Storage, clamp_limit, escape_like_pattern, get_conn, timestamp_column};
use crate::error::StorageError;
use crate::types::{PaginatedResult, PromptFilter};

const PROMPT_COLUMNS: &str = "id, date, prompt, tags";

impl Storage {
    /// Create a prompt stamped with the current time.
    ///
    /// # Errors
    /// `Validation` if `text` is blank; `Database` if the insert fails.
    pub fn create_prompt(&self, text: &str, tags: Option<&str>) -> Result<Prompt, StorageError> {
        validate_prompt_text(text)?;
        let tags = tags.and_then(normalize_tags);
        let date = self.now();

        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO prompts (date, prompt, tags) VALUES (?1, ?2, ?3)",
            params![format_timestamp(&date), text, tags],
        )?;
        let id = PromptId(conn.last_insert_rowid());
        tracing::debug!(prompt_id = %id, "Prompt created");

        Ok(Prompt::new(id, date, text.to_owned(), tags))
    }

    /// Get prompt by ID.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_prompt(&self, id: PromptId) -> Result<Option<Prompt>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let prompt = conn
            .query_row(
                &format!("SELECT {PROMPT_COLUMNS} FROM prompts WHERE id = ?1"),
                params![id.0],
                Self::row_to_prompt,
            )
            .optional()?;
        Ok(prompt)
    }

    /// All prompts, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_prompts_by_date_desc(&self) -> Result<Vec<Prompt>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt =
            conn.prepare(&format!("SELECT {PROMPT_COLUMNS} FROM prompts ORDER BY date DESC, id DESC"))?;
        let prompts = stmt.query_map([], Self::row_to_prompt)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(prompts)
    }

    /// Get prompts with pagination, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn list_prompts_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult<Prompt>, StorageError> {
        let limit = clamp_limit(limit);
        let conn = get_conn(&self.pool)?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM prompts", [], |row| row.get(0))?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {PROMPT_COLUMNS} FROM prompts ORDER BY date DESC, id DESC LIMIT ?1 OFFSET ?2"
        ))?;
        let items = stmt
            .query_map(params![limit as i64, offset as i64], Self::row_to_prompt)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(PaginatedResult::new(items, total as u64, offset as u64, limit as u64))
    }

    /// Search prompts by text substring and/or exact tag, newest first.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn search_prompts(&self, filter: &PromptFilter) -> Result<Vec<Prompt>, StorageError> {
        let mut clauses: Vec<String> = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(text) = filter.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            args.push(format!("%{}%", escape_like_pattern(text)));
            clauses.push(format!(r"prompt LIKE ?{} ESCAPE '\'", args.len()));
        }
        if let Some(tag) = filter.tag.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            args.push(format!("%,{},%", escape_like_pattern(tag)));
            clauses.push(format!(r"(',' || tags || ',') LIKE ?{} ESCAPE '\'", args.len()));
        }

        let where_clause =
            if clauses.is_empty() { String::new() } else { format!("WHERE {}", clauses.join(" AND ")) };
        let sql = format!("SELECT {PROMPT_COLUMNS} FROM prompts {where_clause} ORDER BY date DESC, id DESC");

        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(&sql)?;
        let prompts = stmt
            .query_map(params_from_iter(args.iter()), Self::row_to_prompt)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(prompts)
    }

    /// Delete a prompt together with all of its results.
    ///
    /// Returns the number of results removed.
    ///
    /// # Errors
    /// `NotFound` if the prompt does not exist; nothing is deleted in that case.
    pub fn delete_prompt(&self, id: PromptId) -> Result<usize, StorageError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let removed_results = tx.execute("DELETE FROM results WHERE prompt_id = ?1", params![id.0])?;
        let removed = tx.execute("DELETE FROM prompts WHERE id = ?1", params![id.0])?;
        if removed == 0 {
            return Err(StorageError::not_found("prompt", id));
        }
        tx.commit()?;

        tracing::debug!(prompt_id = %id, removed_results, "Prompt deleted");
        Ok(removed_results)
    }

    pub(crate) fn row_to_prompt(row: &rusqlite::Row<'_>) -> rusqlite::Result<Prompt> {
        Ok(Prompt::new(PromptId(row.get(0)?), timestamp_column(row, 1)?, row.get(2)?, row.get(3)?))
    }
}
