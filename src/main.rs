//! Logly - backend for plotting large CSV time-series logs
//!
//! Serves log file listings, fields, and line-chart traces over HTTP,
//! with a memory-bounded memoization cache in front of CSV loading.

mod api;
mod cache;
mod config;
mod error;
mod frame;
mod loader;
mod models;
mod series;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_stats_reporter;

/// Main entry point for the Logly server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the load cache with the configured byte budget
/// 4. Start the background cache stats reporter
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logly=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Logly server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: log_dir={}, cache_capacity_bytes={}, port={}, stats_interval={}s",
        config.log_dir.display(),
        config.cache_capacity_bytes,
        config.server_port,
        config.stats_interval
    );

    // Create application state with the load cache
    let server_port = config.server_port;
    let stats_interval = config.stats_interval;
    let state = AppState::new(config);
    info!("Load cache initialized");

    // Start background stats reporter
    let reporter_handle = spawn_stats_reporter(Arc::clone(&state.cache), stats_interval);
    info!("Cache stats reporter started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(reporter_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the stats reporter and allows graceful shutdown.
async fn shutdown_signal(reporter_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the stats reporter
    reporter_handle.abort();
    warn!("Stats reporter aborted");
}
