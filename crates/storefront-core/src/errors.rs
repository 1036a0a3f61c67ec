use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Coarse classification of a failure, used to pick the client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthenticated,
    Forbidden,
    Conflict,
    NotFound,
    Internal,
}

/// Error returned from handlers and middleware.
///
/// `error` carries the full cause chain for the logs. What reaches the client
/// depends on `kind`: validation, conflict and not-found errors expose only the
/// outermost message, the others a fixed string.
#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            status,
            error: err.into(),
        }
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthenticated<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Unauthenticated, StatusCode::UNAUTHORIZED, err)
    }

    /// Authenticated, but not allowed. Answered with 401 like the other
    /// credential failures.
    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Forbidden, StatusCode::UNAUTHORIZED, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, StatusCode::CONFLICT, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, StatusCode::NOT_FOUND, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    /// Overrides the status while keeping the kind.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn client_message(&self) -> String {
        match self.kind {
            ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::NotFound => {
                self.error.to_string()
            }
            ErrorKind::Unauthenticated => "unauthenticated".to_string(),
            ErrorKind::Forbidden => "credential error".to_string(),
            ErrorKind::Internal => "internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = %self.status.as_u16(),
                kind = ?self.kind,
                error = %format!("{:#}", self.error),
                "Request failed"
            );
        } else {
            warn!(
                status = %self.status.as_u16(),
                kind = ?self.kind,
                error = %format!("{:#}", self.error),
                "Request rejected"
            );
        }

        let body = Json(json!({
            "error": self.client_message()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let err = AppError::internal(anyhow!("relation \"users\" does not exist"));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }

    #[tokio::test]
    async fn test_forbidden_uses_unauthorized_status() {
        let (status, body) = body_of(AppError::forbidden(anyhow!("role is user"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "credential error");
    }

    #[tokio::test]
    async fn test_unauthenticated_message_is_uniform() {
        let (status, body) = body_of(AppError::unauthenticated(anyhow!("token expired"))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_conflict_shows_only_outer_context() {
        let err = AppError::conflict(
            anyhow!("duplicate key value violates unique constraint").context("category already exists"),
        );
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "category already exists");
    }

    #[test]
    fn test_with_status_keeps_kind() {
        let err = AppError::not_found(anyhow!("user not found")).with_status(StatusCode::UNAUTHORIZED);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_from_any_error_is_internal() {
        let err: AppError = std::io::Error::other("disk on fire").into();
        assert_eq!(err.kind, ErrorKind::Internal);
    }
}
