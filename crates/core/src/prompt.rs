use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::TAG_SEPARATOR;
use crate::{CoreError, PromptId};

/// User-authored prompt text, immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: PromptId,
    pub date: NaiveDateTime,
    pub prompt: String,
    /// Normalised comma-separated labels.
    pub tags: Option<String>,
}

impl Prompt {
    pub fn new(id: PromptId, date: NaiveDateTime, prompt: String, tags: Option<String>) -> Self {
        Self { id, date, prompt, tags }
    }

    /// Individual labels, trimmed, in stored order.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|t| t.split(TAG_SEPARATOR).map(str::trim).filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim();
        self.tag_list().iter().any(|t| t.eq_ignore_ascii_case(wanted))
    }
}

/// Reject prompt text that is empty once surrounding whitespace is removed.
pub fn validate_prompt_text(text: &str) -> crate::Result<()> {
    if text.trim().is_empty() {
        return Err(CoreError::InvalidInput("prompt text must not be empty".to_owned()));
    }
    Ok(())
}

/// Canonical form of a user-typed tag list.
///
/// Labels are trimmed, empty labels dropped and case-insensitive duplicates
/// removed (first spelling wins). Returns `None` when nothing is left.
pub fn normalize_tags(raw: &str) -> Option<String> {
    let mut seen = HashSet::new();
    let labels: Vec<&str> = raw
        .split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_lowercase()))
        .collect();

    if labels.is_empty() {
        None
    } else {
        Some(labels.join(&TAG_SEPARATOR.to_string()))
    }
}
