//! Seed records and configuration.

use storefront_models::CategoryId;

/// Seed data for creating a category.
pub struct CategorySeed {
    pub name: String,
}

/// Seed data for creating a product.
pub struct ProductSeed {
    pub name: String,
    pub weight: f32,
    pub volume: f32,
    pub description: String,
    pub price_cents: i64,
    pub visible: bool,
    pub category_id: CategoryId,
}

/// Seed data for creating a regular user.
pub struct UserSeed {
    pub username: String,
    pub phone: String,
    pub password_digest: String,
}

/// Complete configuration for database seeding.
#[derive(Clone)]
pub struct SeedConfig {
    pub num_categories: usize,
    pub products_per_category: usize,
    pub num_users: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_categories: 5,
            products_per_category: 20,
            num_users: 10,
        }
    }
}

impl SeedConfig {
    pub fn new(num_categories: usize) -> Self {
        Self {
            num_categories,
            ..Default::default()
        }
    }

    pub fn with_products(mut self, per_category: usize) -> Self {
        self.products_per_category = per_category;
        self
    }

    pub fn with_users(mut self, users: usize) -> Self {
        self.num_users = users;
        self
    }

    pub fn total_products(&self) -> usize {
        self.num_categories * self.products_per_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SeedConfig::new(3).with_products(4).with_users(0);
        assert_eq!(config.num_categories, 3);
        assert_eq!(config.total_products(), 12);
        assert_eq!(config.num_users, 0);
    }
}
