//! McpHub gateway binary
//!
//! Loads `mcp_config.json`, auto-registers every configured server, and
//! serves the HTTP front-end until a termination signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use mcphub_core::HubConfig;
use mcphub_gateway::{server, AppState};
use mcphub_mcp::SessionManager;

/// Console tracing with per-crate defaults; RUST_LOG takes precedence.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info")
            .add_directive("mcphub_core=debug".parse().unwrap())
            .add_directive("mcphub_mcp=debug".parse().unwrap())
            .add_directive("mcphub_gateway=debug".parse().unwrap())
    });

    let console_layer = fmt::layer()
        .with_ansi(true)
        .compact()
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Missing or unparsable configuration is the one unrecoverable startup
    // error; everything later reports through structured results.
    let config_path =
        std::env::var("MCPHUB_CONFIG").unwrap_or_else(|_| "mcp_config.json".to_string());
    let config = HubConfig::load(&config_path)
        .with_context(|| format!("failed to load {config_path}"))?;
    info!(
        config = %config_path,
        servers = config.len(),
        "Loaded configuration"
    );

    let manager = Arc::new(SessionManager::new());

    // Auto-register every configured server. Per-server failures are logged
    // and do not prevent the gateway from starting.
    for outcome in manager.register_all(&config.descriptors()).await {
        if outcome.is_success() {
            info!(server_id = ?outcome.server_id, "{}", outcome.message);
        } else {
            warn!(server_id = ?outcome.server_id, "{}", outcome.message);
        }
    }

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    server::serve(addr, AppState::new(manager, Arc::new(config))).await
}
