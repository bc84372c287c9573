//! Environment variable lookups with warn-level logging for invalid values.

use std::path::PathBuf;
use std::str::FromStr;

/// Read a variable, treating unset and blank values alike.
pub fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Parse an environment variable, falling back to `default`.
///
/// An unset or blank variable returns `default` silently. A value that fails to
/// parse is logged at warn level before falling back.
pub fn env_parse_with_default<T: FromStr + std::fmt::Display>(var: &str, default: T) -> T {
    let Some(raw) = env_non_empty(var) else {
        return default;
    };
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(var, value = %raw, default = %default, "invalid env var value, using default");
            default
        },
    }
}

/// Path-valued variable, `None` when unset or blank.
pub fn env_path(var: &str) -> Option<PathBuf> {
    env_non_empty(var).map(PathBuf::from)
}
