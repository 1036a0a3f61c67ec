//! Category and product seeding.

use fake::Fake;
use fake::faker::lorem::en::{Sentence, Word};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use storefront_models::CategoryId;

use super::models::{CategorySeed, ProductSeed};

const BATCH_SIZE: usize = 500;

/// Generates category data in parallel using Rayon.
///
/// Names carry their index so a single run never collides with itself.
pub fn generate_categories(count: usize) -> Vec<CategorySeed> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let word: String = Word().fake();
            CategorySeed {
                name: format!("{} {}", capitalize(&word), i + 1),
            }
        })
        .collect()
}

/// Generates `per_category` products for each category id.
pub fn generate_products(category_ids: &[CategoryId], per_category: usize) -> Vec<ProductSeed> {
    category_ids
        .par_iter()
        .enumerate()
        .flat_map(|(c, category_id)| {
            (0..per_category).into_par_iter().map(move |p| {
                let first: String = Word().fake();
                let second: String = Word().fake();
                let description: String = Sentence(3..8).fake();

                ProductSeed {
                    name: format!("{} {} {}-{}", capitalize(&first), second, c + 1, p + 1),
                    weight: (0.1f32..25.0).fake(),
                    volume: (0.1f32..10.0).fake(),
                    description,
                    price_cents: (99i64..250_000).fake(),
                    visible: (0..10).fake::<u8>() > 1,
                    category_id: *category_id,
                }
            })
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Seeds categories, skipping names that already exist.
pub async fn seed_categories(db: &PgPool, count: usize) -> anyhow::Result<Vec<CategoryId>> {
    let start_time = Instant::now();
    println!("📂 Seeding {} categories...", count);

    let categories = generate_categories(count);
    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(categories.len());

    for chunk in categories.chunks(BATCH_SIZE) {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO categories (name) ");
        query.push_values(chunk, |mut row, category| {
            row.push_bind(&category.name);
        });
        query.push(" ON CONFLICT (name) DO NOTHING RETURNING id");

        let chunk_ids: Vec<CategoryId> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} categories in {:?}",
        ids.len(),
        start_time.elapsed()
    );

    Ok(ids)
}

/// Seeds products for the given categories.
pub async fn seed_products(
    db: &PgPool,
    category_ids: &[CategoryId],
    per_category: usize,
) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!(
        "📦 Seeding {} products...",
        category_ids.len() * per_category
    );

    let products = generate_products(category_ids, per_category);
    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in products.chunks(BATCH_SIZE) {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO products (name, weight, volume, description, price_cents, visible, category_id) ",
        );
        query.push_values(chunk, |mut row, product| {
            row.push_bind(&product.name)
                .push_bind(product.weight)
                .push_bind(product.volume)
                .push_bind(&product.description)
                .push_bind(product.price_cents)
                .push_bind(product.visible)
                .push_bind(product.category_id);
        });
        query.push(" ON CONFLICT (name) DO NOTHING");

        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;
    println!(
        "   ✓ Inserted {} products in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

/// Deletes every product and category.
pub async fn clear_catalog(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing catalog...");

    let mut tx = db.begin().await?;
    let products = sqlx::query("DELETE FROM products")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let categories = sqlx::query("DELETE FROM categories")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    tx.commit().await?;

    println!(
        "   ✓ Deleted {} products and {} categories in {:?}",
        products,
        categories,
        start_time.elapsed()
    );

    Ok(products + categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_category_names_are_unique() {
        let categories = generate_categories(50);
        let mut names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 50);
    }

    #[test]
    fn generated_products_cover_every_category() {
        let ids = vec![CategoryId::new(), CategoryId::new()];
        let products = generate_products(&ids, 3);

        assert_eq!(products.len(), 6);
        for id in &ids {
            assert_eq!(products.iter().filter(|p| p.category_id == *id).count(), 3);
        }
        assert!(products.iter().all(|p| p.price_cents >= 0));
    }

    #[test]
    fn capitalize_handles_empty() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("shoe"), "Shoe");
    }
}
