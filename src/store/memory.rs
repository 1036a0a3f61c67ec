//! In-process store for tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use storefront_models::{
    Category, CategoryId, NewProduct, NewUser, Product, ProductId, ProductRow, User, UserId,
    UserRole,
};

use super::{CatalogStore, StoreError, UserStore};

/// Holds users and catalog in memory with the same uniqueness rules as the
/// database schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    categories: RwLock<Vec<Category>>,
    products: RwLock<Vec<ProductRow>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites a stored role, simulating a demotion made elsewhere.
    pub async fn set_role(&self, id: UserId, role: UserRole) {
        if let Some(user) = self.users.write().await.iter_mut().find(|u| u.id == id) {
            user.role = role;
        }
    }

    pub async fn remove_user(&self, id: UserId) {
        self.users.write().await.retain(|u| u.id != id);
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.username == user.username || u.phone == user.phone)
        {
            return Err(StoreError::AlreadyExists);
        }

        let stored = User {
            id: UserId::new(),
            username: user.username,
            phone: user.phone,
            password_digest: user.password_digest,
            role: user.role,
        };
        users.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password_digest: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username && u.password_digest == password_digest)
            .cloned())
    }

    async fn find_role(&self, id: UserId) -> Result<Option<UserRole>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.role))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn add_category(&self, name: &str) -> Result<Category, StoreError> {
        let mut categories = self.categories.write().await;
        if categories.iter().any(|c| c.name == name) {
            return Err(StoreError::AlreadyExists);
        }

        let category = Category {
            id: CategoryId::new(),
            name: name.to_string(),
        };
        categories.push(category.clone());
        Ok(category)
    }

    async fn add_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        if !self
            .categories
            .read()
            .await
            .iter()
            .any(|c| c.name == product.category)
        {
            return Err(StoreError::NotFound("category"));
        }

        let mut products = self.products.write().await;
        if products.iter().any(|p| p.name == product.name) {
            return Err(StoreError::AlreadyExists);
        }

        let row = ProductRow {
            id: ProductId::new(),
            name: product.name,
            weight: product.weight,
            volume: product.volume,
            description: product.description,
            photos: product.photos,
            price_cents: product.price_cents,
            visible: product.visible,
            category: product.category,
        };
        products.push(row.clone());
        Ok(Product::from(row))
    }

    async fn set_visibility(&self, name: &str, visible: bool) -> Result<(), StoreError> {
        let mut products = self.products.write().await;
        let row = products
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or(StoreError::NotFound("product"))?;
        row.visible = visible;
        Ok(())
    }

    async fn list_visible(&self) -> Result<Vec<Product>, StoreError> {
        self.search(None, None).await
    }

    async fn search(
        &self,
        product: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, StoreError> {
        let needle = product.map(str::to_lowercase);
        let mut rows: Vec<ProductRow> = self
            .products
            .read()
            .await
            .iter()
            .filter(|p| p.visible)
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();

        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
