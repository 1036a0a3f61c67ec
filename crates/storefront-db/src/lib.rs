//! # Storefront DB
//!
//! PostgreSQL pool construction and schema migrations.
//!
//! # Example
//!
//! ```ignore
//! use storefront_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&config.database).await?;
//! if config.database.run_migrations {
//!     run_migrations(&pool).await?;
//! }
//! ```

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use storefront_config::DatabaseConfig;

pub use sqlx::PgPool;

/// Connects a pool sized and bounded by `config`.
///
/// # Errors
///
/// Fails if the first connection cannot be established within the acquire
/// timeout.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies every pending migration from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
