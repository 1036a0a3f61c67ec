//! Persistence seams.
//!
//! Handlers and services only see the [`UserStore`] and [`CatalogStore`]
//! traits. [`PgStore`] backs them with PostgreSQL; `MemoryStore` (feature
//! `test-utils`) keeps everything in process for tests.

use async_trait::async_trait;

use storefront_models::{
    Category, NewProduct, NewUser, Product, User, UserId, UserRole,
};

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    AlreadyExists,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("store call timed out")]
    Timeout,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a credential. A taken username or phone yields
    /// [`StoreError::AlreadyExists`].
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_credentials(
        &self,
        username: &str,
        password_digest: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Current role of a user, `None` if the user no longer exists.
    async fn find_role(&self, id: UserId) -> Result<Option<UserRole>, StoreError>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn add_category(&self, name: &str) -> Result<Category, StoreError>;

    /// Fails with `NotFound("category")` when the named category is missing.
    async fn add_product(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Fails with `NotFound("product")` when no product has that name.
    async fn set_visibility(&self, name: &str, visible: bool) -> Result<(), StoreError>;

    /// Visible products ordered by name.
    async fn list_visible(&self) -> Result<Vec<Product>, StoreError>;

    /// Visible products whose name contains `product` (case-insensitive),
    /// restricted to `category` when given.
    async fn search(
        &self,
        product: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, StoreError>;
}
