//! Credential lookup by name.
//!
//! Models store only the *name* of their API key. The calling layer resolves it
//! right before a request; the store never sees the value.

use std::collections::HashMap;

use crate::CoreError;
use crate::env_config::env_non_empty;

/// Resolves a credential name to its secret value.
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, name: &str) -> crate::Result<String>;

    /// Whether `name` resolves, without handing out the value.
    fn is_available(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }
}

/// Reads credentials from process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentialResolver;

impl CredentialResolver for EnvCredentialResolver {
    fn resolve(&self, name: &str) -> crate::Result<String> {
        env_non_empty(name.trim()).ok_or_else(|| CoreError::MissingCredential(name.to_owned()))
    }
}

/// Fixed name/value table, for wiring tests and scripted runs.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialResolver {
    values: HashMap<String, String>,
}

impl StaticCredentialResolver {
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl CredentialResolver for StaticCredentialResolver {
    fn resolve(&self, name: &str) -> crate::Result<String> {
        self.values
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .ok_or_else(|| CoreError::MissingCredential(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_resolver_reads_variable() {
        let var = "CHATLIST_TEST_CREDENTIAL_55101";
        // SAFETY: variable name is unique to this test.
        unsafe { std::env::set_var(var, "sk-test") };
        assert_eq!(EnvCredentialResolver.resolve(var).unwrap(), "sk-test");
        unsafe { std::env::remove_var(var) };
        assert!(!EnvCredentialResolver.is_available(var));
    }

    #[test]
    fn missing_credential_names_the_variable() {
        let err = EnvCredentialResolver.resolve("CHATLIST_TEST_CREDENTIAL_UNSET_55102").unwrap_err();
        assert!(matches!(err, CoreError::MissingCredential(ref n) if n == "CHATLIST_TEST_CREDENTIAL_UNSET_55102"));
    }

    #[test]
    fn static_resolver_treats_blank_as_missing() {
        let resolver = StaticCredentialResolver::default().with("A", "secret").with("B", " ");
        assert!(resolver.is_available("A"));
        assert!(!resolver.is_available("B"));
        assert!(!resolver.is_available("C"));
    }
}
