use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use tokio::{
    net::TcpListener,
    signal::unix::{SignalKind, signal},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::{
    config::ServerSettings,
    handlers::{
        calculate::handle_calculate,
        health::{handle_bulk_tiers, handle_health},
    },
};

pub fn router() -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/bulk-tiers", get(handle_bulk_tiers))
        .route("/calculate", post(handle_calculate))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(settings: &ServerSettings) -> Result<()> {
    let addr = settings.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let (mut sigterm, mut sigint) =
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {e}");
                return std::future::pending().await;
            }
        };

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM. Shutting down...");
        },
        _ = sigint.recv() => {
            info!("Received SIGINT. Shutting down...");
        }
    }
}
