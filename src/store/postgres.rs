use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use storefront_models::{
    Category, NewProduct, NewUser, Product, ProductId, ProductRow, User, UserId,
    UserRole,
};

use super::{CatalogStore, StoreError, UserStore};

const PRODUCT_COLUMNS: &str = r#"p.id, p.name, p.weight, p.volume, p.description, p.photos,
       p.price_cents, p.visible, c.name AS category"#;

/// PostgreSQL-backed store. Every call is bounded by `query_timeout`.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn timed<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(classify),
            Err(_) => Err(StoreError::Timeout),
        }
    }
}

fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return StoreError::AlreadyExists;
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.timed(
            sqlx::query_as::<_, User>(
                r#"INSERT INTO users (username, phone, password_digest, role)
                   VALUES ($1, $2, $3, $4)
                   RETURNING id, username, phone, password_digest, role"#,
            )
            .bind(&user.username)
            .bind(&user.phone)
            .bind(&user.password_digest)
            .bind(user.role)
            .fetch_one(&self.pool),
        )
        .await
    }

    #[instrument(skip(self, password_digest))]
    async fn find_by_credentials(
        &self,
        username: &str,
        password_digest: &str,
    ) -> Result<Option<User>, StoreError> {
        self.timed(
            sqlx::query_as::<_, User>(
                r#"SELECT id, username, phone, password_digest, role
                   FROM users
                   WHERE username = $1 AND password_digest = $2"#,
            )
            .bind(username)
            .bind(password_digest)
            .fetch_optional(&self.pool),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn find_role(&self, id: UserId) -> Result<Option<UserRole>, StoreError> {
        self.timed(
            sqlx::query_scalar::<_, UserRole>("SELECT role FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    #[instrument(skip(self))]
    async fn add_category(&self, name: &str) -> Result<Category, StoreError> {
        self.timed(
            sqlx::query_as::<_, Category>(
                "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
            )
            .bind(name)
            .fetch_one(&self.pool),
        )
        .await
    }

    #[instrument(skip(self, product), fields(name = %product.name, category = %product.category))]
    async fn add_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let id = self
            .timed(
                sqlx::query_scalar::<_, ProductId>(
                    r#"INSERT INTO products
                           (name, weight, volume, description, photos, price_cents, visible, category_id)
                       SELECT $1, $2, $3, $4, $5, $6, $7, c.id
                       FROM categories c
                       WHERE c.name = $8
                       RETURNING id"#,
                )
                .bind(&product.name)
                .bind(product.weight)
                .bind(product.volume)
                .bind(&product.description)
                .bind(&product.photos)
                .bind(product.price_cents)
                .bind(product.visible)
                .bind(&product.category)
                .fetch_optional(&self.pool),
            )
            .await?
            .ok_or(StoreError::NotFound("category"))?;

        Ok(Product::from(ProductRow {
            id,
            name: product.name,
            weight: product.weight,
            volume: product.volume,
            description: product.description,
            photos: product.photos,
            price_cents: product.price_cents,
            visible: product.visible,
            category: product.category,
        }))
    }

    #[instrument(skip(self))]
    async fn set_visibility(&self, name: &str, visible: bool) -> Result<(), StoreError> {
        let result = self
            .timed(
                sqlx::query("UPDATE products SET visible = $1 WHERE name = $2")
                    .bind(visible)
                    .bind(name)
                    .execute(&self.pool),
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("product"));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_visible(&self) -> Result<Vec<Product>, StoreError> {
        let query = format!(
            r#"SELECT {PRODUCT_COLUMNS}
               FROM products p
               JOIN categories c ON c.id = p.category_id
               WHERE p.visible
               ORDER BY p.name"#
        );

        let rows = self
            .timed(sqlx::query_as::<_, ProductRow>(&query).fetch_all(&self.pool))
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        product: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, StoreError> {
        let query = format!(
            r#"SELECT {PRODUCT_COLUMNS}
               FROM products p
               JOIN categories c ON c.id = p.category_id
               WHERE p.visible
                 AND ($1::text IS NULL OR strpos(lower(p.name), lower($1)) > 0)
                 AND ($2::text IS NULL OR c.name = $2)
               ORDER BY p.name"#
        );

        let rows = self
            .timed(
                sqlx::query_as::<_, ProductRow>(&query)
                    .bind(product)
                    .bind(category)
                    .fetch_all(&self.pool),
            )
            .await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }
}
