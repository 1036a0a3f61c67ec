use axum::{Router, middleware, routing::post};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_admin, refresh_tokens, sign_in, sign_up};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/signUp", post(sign_up))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
        .route("/signIn", post(sign_in))
        .route("/update", post(refresh_tokens))
        .route("/admin", post(create_admin))
}
