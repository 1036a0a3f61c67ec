use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use storefront_auth::TokenError;
use storefront_core::{AppError, ErrorResponse};
use storefront_models::{
    AdminSignUpRequest, RefreshTokenRequest, SignInRequest, SignUpRequest, TokenPair,
    UserResponse,
};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthError;

pub(crate) fn auth_error(err: AuthError) -> AppError {
    match err {
        AuthError::AlreadyExists => AppError::conflict(err),
        AuthError::NotFound => AppError::not_found(err).with_status(StatusCode::UNAUTHORIZED),
        AuthError::RoleMismatch => AppError::forbidden(err),
        AuthError::Token(TokenError::Signing(_) | TokenError::ExpiryOutOfRange) => {
            AppError::internal(err)
        }
        AuthError::Token(_) => AppError::unauthenticated(err),
        AuthError::Store(_) => AppError::internal(err),
    }
}

/// Create a user account (admin only)
#[utoipa::path(
    post,
    path = "/auth/signUp",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed or invalid body", body = ErrorResponse),
        (status = 401, description = "Caller is not a confirmed admin", body = ErrorResponse),
        (status = 409, description = "Username or phone already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(username = %dto.username))]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignUpRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.auth.create_user(dto.into()).await.map_err(auth_error)?;
    Ok(Json(user))
}

/// Exchange username and password for a token pair
#[utoipa::path(
    post,
    path = "/auth/signIn",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenPair),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unknown username or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(username = %dto.username))]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignInRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let user = state
        .auth
        .authenticate(&dto.username, &dto.password)
        .await
        .map_err(auth_error)?;

    let pair = state
        .auth
        .issue_token_pair(&user.id.to_string(), user.role.as_str())
        .map_err(auth_error)?;

    Ok(Json(pair))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/auth/update",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = TokenPair),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Invalid, expired or non-refresh token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_tokens(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RefreshTokenRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let pair = state
        .auth
        .refresh_token_pair(&dto.refresh_token)
        .map_err(auth_error)?;
    Ok(Json(pair))
}

/// Provision an admin account with the shared admin code
#[utoipa::path(
    post,
    path = "/auth/admin",
    request_body = AdminSignUpRequest,
    responses(
        (status = 200, description = "Admin created", body = UserResponse),
        (status = 400, description = "Wrong code or malformed body", body = ErrorResponse),
        (status = 409, description = "Username or phone already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(username = %dto.username))]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<AdminSignUpRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if !state.admin.matches(&dto.code) {
        return Err(AppError::bad_request(anyhow::anyhow!("not valid data")));
    }

    let user = state.auth.create_user(dto.into()).await.map_err(auth_error)?;
    Ok(Json(user))
}
