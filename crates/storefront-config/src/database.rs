//! PostgreSQL connection settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: connection string (required)
//! - `DB_MAX_CONNECTIONS`: pool size (default: 10)
//! - `DB_ACQUIRE_TIMEOUT_SECS`: wait for a pooled connection (default: 5)
//! - `DB_QUERY_TIMEOUT_SECS`: per-call bound on store round-trips (default: 5)
//! - `DB_RUN_MIGRATIONS`: apply pending migrations at startup (default: true)

use std::fmt;
use std::time::Duration;

use crate::env::{ConfigError, flag_or, parse_or, process_env, required};

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub query_timeout: Duration,
    pub run_migrations: bool,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("query_timeout", &self.query_timeout)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            url: required(lookup, "DATABASE_URL")?,
            max_connections: parse_or(lookup, "DB_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(parse_or(lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?),
            query_timeout: Duration::from_secs(parse_or(lookup, "DB_QUERY_TIMEOUT_SECS", 5)?),
            run_migrations: flag_or(lookup, "DB_RUN_MIGRATIONS", true)?,
        })
    }
}
