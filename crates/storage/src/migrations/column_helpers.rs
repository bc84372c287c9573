use rusqlite::Connection;

/// `notnull` flag of `table.column` from `PRAGMA table_info`.
///
/// Returns `Ok(None)` when the table or column does not exist.
pub fn column_not_null_flag(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<Option<bool>> {
    let sql = format!("PRAGMA table_info({})", table);
    let mut stmt = conn.prepare(&sql)?;
    let columns = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, i64>(3)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns.into_iter().find(|(name, _)| name == column).map(|(_, notnull)| notnull != 0))
}

pub fn column_is_not_null(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    Ok(column_not_null_flag(conn, table, column)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_notnull_flag_and_tolerates_missing_columns() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (required TEXT NOT NULL, optional TEXT)").unwrap();

        assert!(column_is_not_null(&conn, "t", "required").unwrap());
        assert!(!column_is_not_null(&conn, "t", "optional").unwrap());
        assert_eq!(column_not_null_flag(&conn, "t", "absent").unwrap(), None);
        assert_eq!(column_not_null_flag(&conn, "missing_table", "x").unwrap(), None);
    }
}
