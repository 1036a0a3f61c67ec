//! Salted credential digests.
//!
//! Passwords are never stored. Instead the store keeps
//! `hex(HMAC-SHA256(key = salt, message = password))`, which lets sign-in look
//! a user up by `(username, digest)` directly. The salt is process-wide, so it
//! must not change once users exist.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use storefront_config::{ConfigError, PasswordConfig};

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct CredentialHasher {
    mac: HmacSha256,
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher").finish_non_exhaustive()
    }
}

impl CredentialHasher {
    pub fn new(salt: &str) -> Result<Self, ConfigError> {
        if salt.is_empty() {
            return Err(ConfigError::Missing("PASSWORD_SALT"));
        }

        let mac = HmacSha256::new_from_slice(salt.as_bytes()).map_err(|e| ConfigError::Invalid {
            name: "PASSWORD_SALT",
            reason: e.to_string(),
        })?;

        Ok(Self { mac })
    }

    pub fn from_config(config: &PasswordConfig) -> Result<Self, ConfigError> {
        Self::new(&config.salt)
    }

    /// Returns the 64-character lowercase hex digest of `plaintext`.
    pub fn hash(&self, plaintext: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(plaintext.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
