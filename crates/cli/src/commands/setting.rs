use anyhow::{Context, Result};
use chatlist_core::{PromptId, SettingKey, WindowGeometry, parse_request_timeout};
use chatlist_storage::{SettingsStore, Storage};
use clap::Subcommand;
use serde_json::json;

use crate::print_json;

#[derive(Subcommand)]
pub enum SettingCommands {
    /// Print the value stored under a key
    Get { key: String },
    /// Store a value, replacing any previous one
    Set { key: String, value: String },
    /// All stored settings
    List,
}

pub(crate) async fn run(storage: &Storage, cmd: SettingCommands) -> Result<()> {
    match cmd {
        SettingCommands::Get { key } => {
            let value = SettingsStore::get_setting(storage, &key).await?;
            print_json(&json!({ "key": key, "value": value }))
        },
        SettingCommands::Set { key, value } => {
            check_value(&key.parse::<SettingKey>()?, &value)?;
            SettingsStore::put_setting(storage, &key, &value).await?;
            print_json(&json!({ "key": key, "value": value }))
        },
        SettingCommands::List => print_json(&SettingsStore::list_settings(storage).await?),
    }
}

/// Reject values the typed accessors could not read back.
fn check_value(key: &SettingKey, value: &str) -> Result<()> {
    match key {
        SettingKey::RequestTimeout => {
            parse_request_timeout(value)?;
        },
        SettingKey::WindowGeometry => {
            serde_json::from_str::<WindowGeometry>(value)
                .context("window_geometry must be JSON like {\"x\":0,\"y\":0,\"width\":800,\"height\":600}")?;
        },
        SettingKey::LastPromptId => {
            value.parse::<PromptId>().context("last_prompt_id must be a prompt id")?;
        },
        SettingKey::ExportPath => {},
        SettingKey::Other(name) => tracing::warn!(key = %name, "Unrecognised setting key, storing as-is"),
    }
    Ok(())
}
