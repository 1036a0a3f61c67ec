use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use storefront::router::init_router;
use storefront::state::AppState;
use storefront::store::MemoryStore;
use storefront_config::AppConfig;
use tower::ServiceExt;

pub const ADMIN_CODE: &str = "test-admin-code";
pub const PASSWORD: &str = "password123";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

#[allow(dead_code)]
pub struct TestTokens {
    pub access: String,
    pub refresh: String,
}

pub fn test_config() -> AppConfig {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("JWT_SECRET", "test_secret_key_for_testing_purposes"),
        ("PASSWORD_SALT", "test_salt"),
        ("ADMIN_CODE", ADMIN_CODE),
        ("DATABASE_URL", "postgres://localhost/storefront_test"),
    ]);
    let lookup = move |key: &str| vars.get(key).map(|v| v.to_string());
    AppConfig::from_lookup(&lookup).unwrap()
}

pub fn setup_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(&config, store.clone(), store.clone()).unwrap();
    let router = init_router(state.clone(), Duration::from_secs(5));

    TestApp {
        router,
        store,
        state,
    }
}

impl TestApp {
    /// Sends a request and returns the status and the JSON body
    /// (`Value::Null` when the body is empty or not JSON).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[allow(dead_code)]
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    /// Creates an admin through `POST /auth/admin` and signs it in.
    pub async fn create_admin(&self, username: &str, phone: &str) -> (Value, TestTokens) {
        let (status, user) = self
            .send(
                "POST",
                "/auth/admin",
                None,
                Some(json!({
                    "username": username,
                    "phone": phone,
                    "password": PASSWORD,
                    "code": ADMIN_CODE
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin creation failed: {}", user);

        let tokens = self.sign_in(username, PASSWORD).await;
        (user, tokens)
    }

    /// Creates a regular user through `POST /auth/signUp` using an admin token.
    #[allow(dead_code)]
    pub async fn create_user(&self, admin_token: &str, username: &str, phone: &str) -> Value {
        let (status, user) = self
            .send(
                "POST",
                "/auth/signUp",
                Some(admin_token),
                Some(json!({
                    "username": username,
                    "phone": phone,
                    "password": PASSWORD
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "sign-up failed: {}", user);
        user
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> TestTokens {
        let (status, body) = self
            .send(
                "POST",
                "/auth/signIn",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "sign-in failed: {}", body);

        TestTokens {
            access: body["access_token"].as_str().unwrap().to_string(),
            refresh: body["refresh_token"].as_str().unwrap().to_string(),
        }
    }
}
