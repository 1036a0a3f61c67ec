//! Fake data generation for the catalog and user tables.
//!
//! Generation runs on Rayon; inserts are batched multi-row statements
//! inside one transaction per table.

pub mod catalog;
pub mod models;
pub mod users;

pub use models::SeedConfig;

use sqlx::PgPool;
use std::time::Instant;
use storefront_core::CredentialHasher;

/// Seeds categories, their products and regular users.
pub async fn seed_all(
    db: &PgPool,
    hasher: &CredentialHasher,
    config: SeedConfig,
) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🌱 Starting database seed...\n");

    let category_ids = catalog::seed_categories(db, config.num_categories).await?;
    catalog::seed_products(db, &category_ids, config.products_per_category).await?;
    if config.num_users > 0 {
        users::seed_users(db, hasher, config.num_users).await?;
    }

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    Ok(())
}

/// Clears the catalog and every non-admin account.
pub async fn clear_all(db: &PgPool) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🧹 Clearing seeded data...\n");

    catalog::clear_catalog(db).await?;
    users::clear_users(db).await?;

    println!("\n✅ Cleared in {:?}", start_time.elapsed());
    Ok(())
}
