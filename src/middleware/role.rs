//! Admin gate for catalog mutations and account creation.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use storefront_core::AppError;

use crate::metrics::track_access_denied;
use crate::middleware::auth::{AuthUser, authenticate};
use crate::state::AppState;

/// Verifies the access token, the `admin` claim and the stored role.
/// Returns the identity to forward on success.
pub async fn check_admin(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, AppError> {
    let user = authenticate(headers, &state.auth)
        .inspect_err(|_| track_access_denied("unauthenticated"))?;

    if !user.is_admin() {
        track_access_denied("not_admin");
        return Err(AppError::forbidden(anyhow::anyhow!(
            "role claim is {}, admin required",
            user.role
        )));
    }

    let id = user.id()?;

    state.auth.confirm_role(id, &user.role).await.map_err(|e| {
        track_access_denied("role_not_confirmed");
        AppError::forbidden(e)
    })?;

    Ok(user)
}

/// Route layer for admin-only routes.
///
/// ```rust,ignore
/// Router::new()
///     .route("/category", post(add_category))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let checked = check_admin(&state, req.headers()).await;
    match checked {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::http::{HeaderValue, StatusCode, header};
    use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
    use storefront_config::AppConfig;

    use crate::store::MemoryStore;

    /// Collects the `reason` label of every `access_denied_total` increment.
    #[derive(Default)]
    struct DenialRecorder {
        reasons: Mutex<Vec<String>>,
    }

    impl Recorder for DenialRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            if key.name() == "access_denied_total" {
                let reasons = key
                    .labels()
                    .filter(|label| label.key() == "reason")
                    .map(|label| label.value().to_string());
                self.reasons.lock().unwrap().extend(reasons);
            }
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn state() -> AppState {
        let vars = HashMap::from([
            ("JWT_SECRET", "role-test-secret"),
            ("PASSWORD_SALT", "salt"),
            ("ADMIN_CODE", "code"),
            ("DATABASE_URL", "postgres://localhost/storefront"),
        ]);
        let lookup = move |key: &str| vars.get(key).map(|v| v.to_string());
        let config = AppConfig::from_lookup(&lookup).unwrap();
        let store = Arc::new(MemoryStore::new());
        AppState::new(&config, store.clone(), store).unwrap()
    }

    fn denial_reasons(headers: HeaderMap) -> (StatusCode, Vec<String>) {
        let state = state();
        let recorder = DenialRecorder::default();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        let result = metrics::with_local_recorder(&recorder, || {
            runtime.block_on(check_admin(&state, &headers))
        });
        let status = result.unwrap_err().status;
        let reasons = recorder.reasons.into_inner().unwrap();
        (status, reasons)
    }

    #[test]
    fn test_missing_token_is_counted() {
        let (status, reasons) = denial_reasons(HeaderMap::new());

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(reasons, ["unauthenticated"]);
    }

    #[test]
    fn test_invalid_token_is_counted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer not.a.token"),
        );

        let (status, reasons) = denial_reasons(headers);

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(reasons, ["unauthenticated"]);
    }
}
