//! # Storefront Config
//!
//! Configuration types for the Storefront API.
//!
//! Every value is read from the process environment exactly once, at startup,
//! through [`AppConfig::from_env`]. The resulting value is immutable and is
//! threaded into the components that need it (token codec, credential hasher,
//! admin provisioning, database pool, HTTP server).
//!
//! - [`jwt`]: token signing secret and token lifetimes
//! - [`password`]: process-wide salt for credential digests
//! - [`admin`]: shared secret for admin provisioning
//! - [`database`]: PostgreSQL connection and query settings
//! - [`server`]: bind address and request timeout
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! Secrets (`JWT_SECRET`, `PASSWORD_SALT`, `ADMIN_CODE`) have no defaults and
//! their `Debug` output is redacted.
//!
//! # Example
//!
//! ```ignore
//! use storefront_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.addr());
//! ```

pub mod admin;
pub mod cors;
pub mod database;
pub mod env;
pub mod jwt;
pub mod password;
pub mod server;

pub use admin::AdminConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use env::ConfigError;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

/// All runtime configuration of the API process.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub admin: AdminConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Loads the whole configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered: a required variable is
    /// missing or a variable holds a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env::process_env)
    }

    /// Loads the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            jwt: JwtConfig::from_lookup(lookup)?,
            password: PasswordConfig::from_lookup(lookup)?,
            admin: AdminConfig::from_lookup(lookup)?,
            database: DatabaseConfig::from_lookup(lookup)?,
            server: ServerConfig::from_lookup(lookup)?,
            cors: CorsConfig::from_lookup(lookup),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_app_config_loads_with_required_values() {
        let lookup = vars(&[
            ("JWT_SECRET", "jwt-secret"),
            ("PASSWORD_SALT", "salt"),
            ("ADMIN_CODE", "code"),
            ("DATABASE_URL", "postgres://localhost/storefront"),
        ]);

        let config = AppConfig::from_lookup(&lookup).unwrap();
        assert_eq!(config.jwt.access_token_expiry, jwt::DEFAULT_ACCESS_TOKEN_EXPIRY);
        assert_eq!(config.server.port, server::DEFAULT_PORT);
        assert!(config.database.run_migrations);
    }

    #[test]
    fn test_app_config_reports_first_missing_secret() {
        let lookup = vars(&[("PASSWORD_SALT", "salt"), ("ADMIN_CODE", "code")]);

        let err = AppConfig::from_lookup(&lookup).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_app_config_debug_hides_secrets() {
        let lookup = vars(&[
            ("JWT_SECRET", "super-secret-signing-key"),
            ("PASSWORD_SALT", "pepper-and-salt"),
            ("ADMIN_CODE", "let-me-in"),
            ("DATABASE_URL", "postgres://app:hunter2@db/storefront"),
        ]);

        let config = AppConfig::from_lookup(&lookup).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-signing-key"));
        assert!(!debug.contains("pepper-and-salt"));
        assert!(!debug.contains("let-me-in"));
        assert!(!debug.contains("hunter2"));
    }
}
