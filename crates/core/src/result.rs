use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{ModelId, PromptId, ResultId};

/// One model's response to one prompt.
///
/// `model_id` becomes `None` once the generating model is deleted; the
/// response itself is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResult {
    pub id: ResultId,
    pub prompt_id: PromptId,
    pub model_id: Option<ModelId>,
    pub response: String,
    pub selected: bool,
    pub created_at: NaiveDateTime,
}

impl PromptResult {
    pub fn new(
        id: ResultId,
        prompt_id: PromptId,
        model_id: Option<ModelId>,
        response: String,
        selected: bool,
        created_at: NaiveDateTime,
    ) -> Self {
        Self { id, prompt_id, model_id, response, selected, created_at }
    }

    pub fn is_orphaned(&self) -> bool {
        self.model_id.is_none()
    }
}

/// A completed model call waiting to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResult {
    pub prompt_id: PromptId,
    pub model_id: Option<ModelId>,
    pub response: String,
    #[serde(default)]
    pub selected: bool,
}

impl NewResult {
    pub fn new(prompt_id: PromptId, model_id: Option<ModelId>, response: impl Into<String>) -> Self {
        Self { prompt_id, model_id, response: response.into(), selected: false }
    }

    #[must_use]
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}
