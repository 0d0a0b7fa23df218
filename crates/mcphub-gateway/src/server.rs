//! Gateway server wiring: routes, layers, graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::handlers;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::status))
        .route("/register", post(handlers::register))
        .route("/disconnect", post(handlers::disconnect))
        .route("/call-tool", post(handlers::call_tool))
        .route("/list-tools/{server_name}", get(handlers::list_tools))
        .route("/list-resources/{server_name}", get(handlers::list_resources))
        .route("/read-resource", post(handlers::read_resource))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until SIGINT/SIGTERM, then close every session before returning.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let manager = Arc::clone(&state.manager);
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "McpHub gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server error")?;

    // Graceful shutdown runs once per process; per-session failures are
    // logged and do not block exit.
    for outcome in manager.shutdown_all().await {
        if outcome.is_success() {
            info!(server_id = ?outcome.server_id, "{}", outcome.message);
        } else {
            warn!(server_id = ?outcome.server_id, "{}", outcome.message);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Termination signal received. Cleaning up...");
}
