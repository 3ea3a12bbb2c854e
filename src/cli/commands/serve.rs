//! HTTP server command handler

use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

use crate::api;
use crate::config::Config;
use metrics_exporter_prometheus::PrometheusHandle;

pub async fn cmd_serve(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("mikrogen v{} starting...", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.bind_address, config.server.port);
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;

    let sweeper = state.shared.spawn_batch_sweeper(Duration::from_secs(60));

    let app = api::router(state).await;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Web server running at http://{}", addr);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => error!("Error listening for shutdown: {}", e),
            }
        })
        .await;

    sweeper.abort();
    info!("Server stopped");

    result.map_err(Into::into)
}
