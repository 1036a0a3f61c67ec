use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use storefront_core::AppError;
use storefront_models::{UserId, UserRole};

use crate::metrics::track_access_denied;
use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// Identity proven by a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// `sub` claim of the token
    pub user_id: String,
    /// `role` claim of the token
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin.as_str()
    }

    /// Parses the subject as a store key. Tokens are only minted for stored
    /// users, so a failure here is a server fault.
    pub fn id(&self) -> Result<UserId, AppError> {
        self.user_id.parse().map_err(|e| {
            AppError::internal(anyhow::anyhow!("token subject is not a user id: {}", e))
        })
    }
}

/// Returns the credential of an `Authorization` value made of exactly two
/// space-separated parts.
pub fn bearer_credential(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_scheme), Some(credential), None) => Some(credential),
        _ => None,
    }
}

pub(crate) fn authenticate(headers: &HeaderMap, auth: &AuthService) -> Result<AuthUser, AppError> {
    let credential = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_credential)
        .ok_or_else(|| {
            AppError::unauthenticated(anyhow::anyhow!("missing or malformed authorization header"))
        })?;

    let verified = auth
        .verify_access(credential)
        .map_err(AppError::unauthenticated)?;

    Ok(AuthUser {
        user_id: verified.subject,
        role: verified.role,
    })
}

/// Forwards only requests carrying a valid access token.
pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    match authenticate(req.headers(), &state.auth) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => {
            track_access_denied("unauthenticated");
            err.into_response()
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        authenticate(&parts.headers, &state.auth)
    }
}
