#![allow(
    clippy::redundant_pub_crate,
    reason = "migrations module is private, pub(crate) is intentional"
)]

mod column_helpers;
mod v1;
mod v2;
mod v3;

use chatlist_core::normalize_tags;
use column_helpers::column_is_not_null;
use rusqlite::{Connection, params};

pub const SCHEMA_VERSION: i32 = 3;

pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1i32 {
        tracing::info!("Running migration v1: prompts, models, results, settings");
        conn.execute_batch(v1::SQL)?;
    }

    if current_version < 2i32 {
        tracing::info!("Running migration v2: nullable results.model_id and reference repair");
        // Table rebuild must not trigger cascades; the pragma is a no-op inside a transaction.
        conn.pragma_update(None, "foreign_keys", false)?;
        let repaired = repair_results(conn);
        conn.pragma_update(None, "foreign_keys", true)?;
        repaired?;
    }

    if current_version < 3i32 {
        tracing::info!("Running migration v3: canonical prompt tags");
        normalize_prompt_tags(conn)?;
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tracing::info!("Database schema up to date (version {})", SCHEMA_VERSION);

    Ok(())
}

/// Databases written by the first desktop release declared `model_id NOT NULL`
/// and ran with foreign keys off, so deletes never cascaded. Rebuild the table
/// when needed and clear references that point nowhere.
fn repair_results(conn: &Connection) -> Result<(), rusqlite::Error> {
    if column_is_not_null(conn, "results", "model_id")? {
        tracing::info!("Rebuilding results table with nullable model_id");
        conn.execute_batch(v2::REBUILD_RESULTS_SQL)?;
    }

    let dropped = conn.execute(v2::DELETE_DANGLING_PROMPT_REFS_SQL, [])?;
    let orphaned = conn.execute(v2::CLEAR_DANGLING_MODEL_REFS_SQL, [])?;
    if dropped > 0 || orphaned > 0 {
        tracing::warn!(dropped, orphaned, "Repaired results with dangling references");
    }
    Ok(())
}

/// The first desktop release stored tags exactly as typed (`"code, python"`).
/// Rewrite them in the trimmed, de-duplicated form tag search expects.
fn normalize_prompt_tags(conn: &Connection) -> Result<(), rusqlite::Error> {
    let tx = conn.unchecked_transaction()?;
    let tagged = {
        let mut stmt = tx.prepare(v3::SELECT_TAGGED_PROMPTS_SQL)?;
        stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?
    };

    let mut rewritten = 0usize;
    for (id, raw) in tagged {
        let canonical = normalize_tags(&raw);
        if canonical.as_deref() != Some(raw.as_str()) {
            rewritten += tx.execute(v3::UPDATE_PROMPT_TAGS_SQL, params![canonical, id])?;
        }
    }
    tx.commit()?;

    if rewritten > 0 {
        tracing::info!(rewritten, "Normalised legacy prompt tags");
    }
    Ok(())
}
