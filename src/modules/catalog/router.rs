use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::auth::require_auth;
use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{add_category, add_product, change_visibility, get_catalog, search_catalog};

/// Catalog mutations, admin only.
pub fn init_catalog_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/category", post(add_category))
        .route("/product", post(add_product))
        .route("/product/change", put(change_visibility))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

/// Catalog reads, any authenticated user.
pub fn init_catalog_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_catalog))
        .route("/search", get(search_catalog))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
