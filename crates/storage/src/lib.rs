//! Storage layer for ChatList
//!
//! SQLite-backed persistence for prompts, model configurations, model results
//! and key/value settings, with cascade and orphaning rules enforced inside
//! single transactions.

mod app_settings;
mod error;
mod migrations;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;
mod types;

pub use app_settings::AppSettings;
pub use error::StorageError;
pub use migrations::SCHEMA_VERSION;
pub use storage::Storage;
pub use traits::{ModelStore, PromptStore, ResultStore, SettingsStore, StatsStore};
pub use types::{PaginatedResult, PromptFilter, ResultFilter, StorageStats};
