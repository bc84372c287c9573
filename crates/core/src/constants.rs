//! Shared constants for ChatList.

/// Application directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "ChatList";

/// Default database file name.
pub const DB_FILE_NAME: &str = "chatlist.db";

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "CHATLIST_DB_PATH";

/// Environment variable controlling the connection pool size.
pub const DB_POOL_SIZE_ENV: &str = "CHATLIST_DB_POOL_SIZE";

/// Default connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;

/// SQLite busy timeout in milliseconds.
pub const DB_BUSY_TIMEOUT_MS: i32 = 5000;

/// Maximum number of rows returned by any paginated query.
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default page size when the caller does not pass one.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Request timeout used when the `request_timeout` setting is absent or invalid.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Persisted timestamp layout (`YYYY-MM-DD HH:MM:SS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between labels in the `tags` column.
pub const TAG_SEPARATOR: char = ',';
