use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Row of the `settings` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub id: i64,
    pub key: String,
    pub value: Option<String>,
}

/// Settings keys the application understands.
///
/// Anything else round-trips through [`SettingKey::Other`] untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Default destination for exports.
    ExportPath,
    /// Per-request timeout for model calls, in whole seconds.
    RequestTimeout,
    /// Main window position and size as JSON.
    WindowGeometry,
    /// Prompt shown when the application was last closed.
    LastPromptId,
    Other(String),
}

impl SettingKey {
    pub const KNOWN: [Self; 4] =
        [Self::ExportPath, Self::RequestTimeout, Self::WindowGeometry, Self::LastPromptId];

    pub fn as_str(&self) -> &str {
        match self {
            Self::ExportPath => "export_path",
            Self::RequestTimeout => "request_timeout",
            Self::WindowGeometry => "window_geometry",
            Self::LastPromptId => "last_prompt_id",
            Self::Other(key) => key,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Display for SettingKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.is_empty() {
            return Err(CoreError::InvalidInput("setting key must not be empty".to_owned()));
        }
        Ok(match key {
            "export_path" => Self::ExportPath,
            "request_timeout" => Self::RequestTimeout,
            "window_geometry" => Self::WindowGeometry,
            "last_prompt_id" => Self::LastPromptId,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl From<&str> for SettingKey {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| Self::Other(s.to_owned()))
    }
}

/// Saved main-window placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Parse a stored `request_timeout` value (positive whole seconds).
pub fn parse_request_timeout(value: &str) -> crate::Result<Duration> {
    let invalid = |reason: &str| CoreError::InvalidSetting {
        key: SettingKey::RequestTimeout.to_string(),
        reason: reason.to_owned(),
    };
    let secs: u64 = value.trim().parse().map_err(|_| invalid("expected whole seconds"))?;
    if secs == 0 {
        return Err(invalid("timeout must be positive"));
    }
    Ok(Duration::from_secs(secs))
}
