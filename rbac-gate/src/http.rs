use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{api::router::ApiRoutes, app_state::SharedAppState};

pub async fn setup_http_server(
    app_state: SharedAppState,
    bind_address: &str,
) -> anyhow::Result<tokio::task::JoinHandle<anyhow::Result<()>>> {
    let app = ApiRoutes::create(app_state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!("API-Server starting at {}", bind_address);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                }
                info!("Shutdown signal received, shutting down HTTP server gracefully");
            })
            .await?;
        info!("HTTP server is down");
        Ok(())
    });

    Ok(handle)
}
