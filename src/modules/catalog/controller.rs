use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::instrument;

use storefront_core::{AppError, ErrorResponse};
use storefront_models::{
    Category, CreateCategoryDto, CreateProductDto, Product, SearchParams, VisibilityDto,
};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::CatalogService;

/// Create a category
#[utoipa::path(
    post,
    path = "/category",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Caller is not a confirmed admin", body = ErrorResponse),
        (status = 409, description = "Category already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state))]
pub async fn add_category(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = CatalogService::add_category(state.catalog.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Add a product to an existing category
#[utoipa::path(
    post,
    path = "/product",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Caller is not a confirmed admin", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse),
        (status = 409, description = "Product already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, dto), fields(name = %dto.name))]
pub async fn add_product(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProductDto>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = CatalogService::add_product(state.catalog.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Show or hide a product in the catalog
#[utoipa::path(
    put,
    path = "/product/change",
    request_body = VisibilityDto,
    responses(
        (status = 200, description = "Visibility changed", body = VisibilityDto),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Caller is not a confirmed admin", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state))]
pub async fn change_visibility(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VisibilityDto>,
) -> Result<Json<VisibilityDto>, AppError> {
    let changed = CatalogService::change_visibility(state.catalog.as_ref(), dto).await?;
    Ok(Json(changed))
}

/// List visible products
#[utoipa::path(
    get,
    path = "/catalog",
    responses(
        (status = 200, description = "Visible products ordered by name", body = Vec<Product>),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn get_catalog(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = CatalogService::get_catalog(state.catalog.as_ref()).await?;
    Ok(Json(products))
}

/// Search visible products by name and/or category
#[utoipa::path(
    get,
    path = "/catalog/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching visible products", body = Vec<Product>),
        (status = 400, description = "Neither product nor category given", body = ErrorResponse),
        (status = 401, description = "Missing or invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn search_catalog(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = CatalogService::search(state.catalog.as_ref(), params).await?;
    Ok(Json(products))
}
