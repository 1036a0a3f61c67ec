//! Regular user seeding.

use fake::Fake;
use fake::faker::name::en::FirstName;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use storefront_core::CredentialHasher;
use storefront_models::UserRole;

use super::models::UserSeed;

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

const BATCH_SIZE: usize = 500;

/// Generates user data in parallel using Rayon.
///
/// Usernames are alphanumeric and phones numeric so seeded accounts pass
/// the same validation as sign-up.
pub fn generate_users(count: usize, hasher: &CredentialHasher) -> Vec<UserSeed> {
    let digest = hasher.hash(SEED_PASSWORD);

    (0..count)
        .into_par_iter()
        .map(|i| {
            let first: String = FirstName().fake();
            let first: String = first.chars().filter(char::is_ascii_alphanumeric).collect();
            let suffix: u32 = (1000..9999).fake();

            UserSeed {
                username: format!("{}{}{}", first.to_lowercase(), suffix, i),
                phone: format!("7{:010}", i),
                password_digest: digest.clone(),
            }
        })
        .collect()
}

/// Seeds regular users, skipping any whose username or phone exists.
pub async fn seed_users(
    db: &PgPool,
    hasher: &CredentialHasher,
    count: usize,
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", count);

    let users = generate_users(count, hasher);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in users.chunks(BATCH_SIZE) {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO users (username, phone, password_digest, role) ");
        query.push_values(chunk, |mut row, user| {
            row.push_bind(&user.username)
                .push_bind(&user.phone)
                .push_bind(&user.password_digest)
                .push_bind(UserRole::User);
        });
        query.push(" ON CONFLICT DO NOTHING");

        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} users in {:?} (password: {})",
        inserted,
        start_time.elapsed(),
        SEED_PASSWORD
    );

    Ok(inserted)
}

/// Deletes every account with the `user` role. Admins are kept.
pub async fn clear_users(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing users...");

    let deleted = sqlx::query("DELETE FROM users WHERE role = $1")
        .bind(UserRole::User)
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
