//! SixSplit Server
//!
//! Splits uploaded images into six carousel strips, serves them back for
//! selection and assembles the chosen strips into a downloadable PDF.

use std::net::SocketAddr;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sixsplit_server::config::Config;
use sixsplit_server::routes;
use sixsplit_server::state::AppState;
use sixsplit_server::storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sixsplit_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("Starting SixSplit Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Temp directory: {}", config.storage.temp_dir);
    tracing::info!("Static directory: {}", config.server.static_dir);

    // Create application state
    let state = AppState::new(config.clone()).await?;

    // Background sweep for strip files no batch references anymore
    if config.sweep.enabled {
        storage::start_sweep_task(
            state.temp().clone(),
            state.store().clone(),
            config.sweep.interval(),
            config.sweep.max_age(),
        );
    }

    let app = routes::app(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("SixSplit Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
