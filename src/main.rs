use anyhow::Context;
use dotenvy::dotenv;
use tracing::{info, warn};

use inkpost::logging::init_tracing;
use inkpost::metrics::{init_metrics, metrics_app};
use inkpost::router::init_router;
use inkpost::state::init_app_state;
use inkpost_config::ServerConfig;
use inkpost_db::run_migrations;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let state = init_app_state().await?;
    run_migrations(&state.db)
        .await
        .context("Failed to run database migrations")?;

    let mut app = init_router(state);
    match init_metrics() {
        Ok(Some(handle)) => app = app.merge(metrics_app(handle)),
        Ok(None) => info!("Metrics disabled"),
        Err(e) => warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled"),
    }

    let address = ServerConfig::from_env().address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", address);

    axum::serve(listener, app).await?;

    Ok(())
}
