use std::fmt;
use std::sync::Arc;

use storefront_config::{AdminConfig, AppConfig, ConfigError, CorsConfig};

use crate::modules::auth::service::AuthService;
use crate::store::{CatalogStore, UserStore};

/// Shared, read-only state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub catalog: Arc<dyn CatalogStore>,
    pub admin: AdminConfig,
    pub cors_config: CorsConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("admin", &self.admin)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Composes the state from configuration and the two stores.
    pub fn new(
        config: &AppConfig,
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogStore>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            auth: AuthService::from_config(users, config)?,
            catalog,
            admin: config.admin.clone(),
            cors_config: config.cors.clone(),
        })
    }
}
