use anyhow::anyhow;
use tracing::instrument;

use storefront_core::AppError;
use storefront_models::{
    Category, CreateCategoryDto, CreateProductDto, NewProduct, Product, SearchParams,
    VisibilityDto,
};

use crate::store::{CatalogStore, StoreError};

/// Maps a store failure on a path with no uniqueness constraint.
fn store_error(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(_) => AppError::not_found(err),
        StoreError::AlreadyExists | StoreError::Timeout | StoreError::Database(_) => {
            AppError::internal(err)
        }
    }
}

/// Maps a store failure on an insert, using `conflict` as the client message
/// for uniqueness violations.
fn insert_error(err: StoreError, conflict: &'static str) -> AppError {
    match err {
        StoreError::AlreadyExists => AppError::conflict(anyhow::Error::new(err).context(conflict)),
        other => store_error(other),
    }
}

pub struct CatalogService;

impl CatalogService {
    #[instrument(skip(store))]
    pub async fn add_category(
        store: &dyn CatalogStore,
        dto: CreateCategoryDto,
    ) -> Result<Category, AppError> {
        store
            .add_category(dto.name.trim())
            .await
            .map_err(|e| insert_error(e, "category already exists"))
    }

    #[instrument(skip(store, dto), fields(name = %dto.name, category = %dto.category))]
    pub async fn add_product(
        store: &dyn CatalogStore,
        dto: CreateProductDto,
    ) -> Result<Product, AppError> {
        store
            .add_product(NewProduct::from(dto))
            .await
            .map_err(|e| insert_error(e, "product already exists"))
    }

    #[instrument(skip(store))]
    pub async fn change_visibility(
        store: &dyn CatalogStore,
        dto: VisibilityDto,
    ) -> Result<VisibilityDto, AppError> {
        store
            .set_visibility(&dto.name, dto.visible)
            .await
            .map_err(store_error)?;
        Ok(dto)
    }

    #[instrument(skip(store))]
    pub async fn get_catalog(store: &dyn CatalogStore) -> Result<Vec<Product>, AppError> {
        store
            .list_visible()
            .await
            .map_err(store_error)
    }

    #[instrument(skip(store))]
    pub async fn search(
        store: &dyn CatalogStore,
        params: SearchParams,
    ) -> Result<Vec<Product>, AppError> {
        if params.is_empty() {
            return Err(AppError::bad_request(anyhow!(
                "product or category query parameter is required"
            )));
        }

        store
            .search(params.product_term(), params.category_name())
            .await
            .map_err(store_error)
    }
}
