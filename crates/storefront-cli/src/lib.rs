//! # Storefront CLI
//!
//! Database seeding utilities for Storefront testing and development.
//!
//! ## Usage
//!
//! ```ignore
//! use storefront_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10); // 10 categories with defaults
//! seed_all(&pool, &hasher, config).await?;
//! ```

pub mod admin;
pub mod seeder;
