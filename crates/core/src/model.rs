use serde::{Deserialize, Serialize};

use crate::{CoreError, ModelId};

/// Configured language-model endpoint.
///
/// `api_id` names the credential (usually an environment variable); the
/// secret itself is never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,
    pub name: String,
    pub api_url: String,
    pub api_id: String,
    pub is_active: bool,
}

impl Model {
    pub fn new(id: ModelId, name: String, api_url: String, api_id: String, is_active: bool) -> Self {
        Self { id, name, api_url, api_id, is_active }
    }
}

/// Fields supplied when creating or replacing a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInput {
    pub name: String,
    pub api_url: String,
    pub api_id: String,
    pub is_active: bool,
}

impl ModelInput {
    pub fn new(
        name: impl Into<String>,
        api_url: impl Into<String>,
        api_id: impl Into<String>,
        is_active: bool,
    ) -> Self {
        Self { name: name.into(), api_url: api_url.into(), api_id: api_id.into(), is_active }
    }

    /// Trimmed copy, rejecting blank required fields.
    pub fn validated(&self) -> crate::Result<Self> {
        let name = self.name.trim();
        let api_url = self.api_url.trim();
        let api_id = self.api_id.trim();
        for (field, value) in [("name", name), ("api_url", api_url), ("api_id", api_id)] {
            if value.is_empty() {
                return Err(CoreError::InvalidInput(format!("model {field} must not be empty")));
            }
        }
        Ok(Self::new(name, api_url, api_id, self.is_active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_trims_fields() {
        let input = ModelInput::new(" GPT-4 ", " https://api.openai.com/v1 ", " OPENAI_API_KEY ", true);
        let clean = input.validated().unwrap();
        assert_eq!(clean.name, "GPT-4");
        assert_eq!(clean.api_url, "https://api.openai.com/v1");
        assert_eq!(clean.api_id, "OPENAI_API_KEY");
    }

    #[test]
    fn validated_rejects_blank_credential_name() {
        let input = ModelInput::new("GPT-4", "https://api.openai.com/v1", "  ", true);
        let err = input.validated().unwrap_err();
        assert!(err.to_string().contains("api_id"));
    }
}
