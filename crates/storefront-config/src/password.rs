use std::fmt;

use crate::env::{ConfigError, process_env, required};

/// Process-wide salt mixed into every credential digest.
///
/// Stored digests are only verifiable while the salt stays the same, so it
/// must be stable across restarts and deployments.
#[derive(Clone)]
pub struct PasswordConfig {
    pub salt: String,
}

impl fmt::Debug for PasswordConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordConfig")
            .field("salt", &"<redacted>")
            .finish()
    }
}

impl PasswordConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            salt: required(lookup, "PASSWORD_SALT")?,
        })
    }
}
