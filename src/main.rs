use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use storefront::logging::{init_tracing, shutdown_tracer};
use storefront::metrics::{init_metrics, metrics_app};
use storefront::router::init_router;
use storefront::state::AppState;
use storefront::store::PgStore;
use storefront_config::AppConfig;
use storefront_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let config = AppConfig::from_env()?;
    info!(server = ?config.server, database = ?config.database, "Configuration loaded");

    let pool = init_db_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    let store = Arc::new(PgStore::new(pool, config.database.query_timeout));
    let state = AppState::new(&config, store.clone(), store)?;

    let mut app = init_router(state, config.server.request_timeout);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
    }

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    shutdown_tracer();
    Ok(())
}
