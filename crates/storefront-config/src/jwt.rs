use std::fmt;

use crate::env::{ConfigError, parse_or, process_env, required};

/// Default access token lifetime: 30 minutes.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 30 * 60;
/// Default refresh token lifetime: 1000 hours.
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: i64 = 1000 * 60 * 60;
/// Upper bound for either expiry: 10 years.
pub const MAX_TOKEN_EXPIRY: i64 = 10 * 365 * 24 * 60 * 60;

/// Token signing configuration. Expiries are in seconds.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub refresh_token_expiry: i64,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish()
    }
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            secret: required(lookup, "JWT_SECRET")?,
            access_token_expiry: parse_or(lookup, "JWT_ACCESS_EXPIRY", DEFAULT_ACCESS_TOKEN_EXPIRY)?,
            refresh_token_expiry: parse_or(
                lookup,
                "JWT_REFRESH_EXPIRY",
                DEFAULT_REFRESH_TOKEN_EXPIRY,
            )?,
        };

        if config.access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY",
                reason: "must be a positive number of seconds".to_string(),
            });
        }
        if config.access_token_expiry > MAX_TOKEN_EXPIRY {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY",
                reason: format!("must not exceed {} seconds", MAX_TOKEN_EXPIRY),
            });
        }
        if config.refresh_token_expiry > MAX_TOKEN_EXPIRY {
            return Err(ConfigError::Invalid {
                name: "JWT_REFRESH_EXPIRY",
                reason: format!("must not exceed {} seconds", MAX_TOKEN_EXPIRY),
            });
        }
        if config.refresh_token_expiry <= config.access_token_expiry {
            return Err(ConfigError::Invalid {
                name: "JWT_REFRESH_EXPIRY",
                reason: "must be longer than JWT_ACCESS_EXPIRY".to_string(),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_token_policy() {
        let lookup = |name: &str| (name == "JWT_SECRET").then(|| "s3cret".to_string());
        let config = JwtConfig::from_lookup(&lookup).unwrap();

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 3_600_000);
    }

    #[test]
    fn test_expiries_are_capped() {
        let lookup = |name: &str| match name {
            "JWT_SECRET" => Some("s3cret".to_string()),
            "JWT_REFRESH_EXPIRY" => Some("10000000000000".to_string()),
            _ => None,
        };
        let err = JwtConfig::from_lookup(&lookup).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "JWT_REFRESH_EXPIRY",
                ..
            }
        ));

        let lookup = |name: &str| match name {
            "JWT_SECRET" => Some("s3cret".to_string()),
            "JWT_ACCESS_EXPIRY" => Some((MAX_TOKEN_EXPIRY + 1).to_string()),
            "JWT_REFRESH_EXPIRY" => Some((MAX_TOKEN_EXPIRY + 2).to_string()),
            _ => None,
        };
        let err = JwtConfig::from_lookup(&lookup).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY",
                ..
            }
        ));
    }

    #[test]
    fn test_cap_itself_is_accepted() {
        let lookup = |name: &str| match name {
            "JWT_SECRET" => Some("s3cret".to_string()),
            "JWT_REFRESH_EXPIRY" => Some(MAX_TOKEN_EXPIRY.to_string()),
            _ => None,
        };
        let config = JwtConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.refresh_token_expiry, MAX_TOKEN_EXPIRY);
    }

    #[test]
    fn test_refresh_must_outlive_access() {
        let lookup = |name: &str| match name {
            "JWT_SECRET" => Some("s3cret".to_string()),
            "JWT_ACCESS_EXPIRY" => Some("600".to_string()),
            "JWT_REFRESH_EXPIRY" => Some("300".to_string()),
            _ => None,
        };

        let err = JwtConfig::from_lookup(&lookup).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "JWT_REFRESH_EXPIRY",
                ..
            }
        ));
    }
}
