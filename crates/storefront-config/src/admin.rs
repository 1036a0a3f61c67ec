use std::fmt;

use sha2::{Digest, Sha256};

use crate::env::{ConfigError, process_env, required};

/// Shared secret that must accompany admin self-provisioning requests.
#[derive(Clone)]
pub struct AdminConfig {
    code: String,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("code", &"<redacted>")
            .finish()
    }
}

impl AdminConfig {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::new(required(lookup, "ADMIN_CODE")?))
    }

    /// Checks a submitted code. Both sides are digested first so the
    /// comparison time does not depend on the length of the common prefix.
    pub fn matches(&self, candidate: &str) -> bool {
        Sha256::digest(self.code.as_bytes()) == Sha256::digest(candidate.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_exact_code_only() {
        let config = AdminConfig::new("open-sesame");

        assert!(config.matches("open-sesame"));
        assert!(!config.matches("open-sesame "));
        assert!(!config.matches("OPEN-SESAME"));
        assert!(!config.matches(""));
    }
}
