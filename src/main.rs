//! HTTP Adapter - Entry Point
//!
//! Serves a small demo router behind the adapter until SIGINT or
//! until the server stops on its own.
//!
//! Wiring sequence:
//! 1. Load config.toml (path from `HTTP_ADAPTER_CONFIG`) + validate
//! 2. Init tracing (JSON structured logging by default)
//! 3. Build the wrapped router and the adapter around it
//! 4. Register the stop channel and spawn `open`
//! 5. Wait for SIGINT or a stop notification → `close`

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{info, warn};

use http_adapter::adapters::logging::init_tracing;
use http_adapter::config::loader::load_config;
use http_adapter::{Adapter, HttpAdapter, TracingLogger};

const CONFIG_ENV: &str = "HTTP_ADAPTER_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config_path =
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.toml".to_string());
    let config = load_config(&config_path).context("Failed to load configuration")?;

    // ── 2. Initialize structured logging ────────────────────
    init_tracing(&config.logging);

    info!(
        port = config.server.port,
        version = %config.server.version,
        "Starting HTTP adapter"
    );

    // ── 3. Wrap the application router ──────────────────────
    let adapter = Arc::new(
        HttpAdapter::new(demo_router(), &config.server, Arc::new(TracingLogger))
            .context("Failed to build HTTP adapter")?,
    );

    // ── 4. Stop channel + serve ─────────────────────────────
    let (stop_tx, mut stop_rx) = broadcast::channel::<()>(1);
    adapter.notify_stop(stop_tx);

    let server = Arc::clone(&adapter);
    let server_handle = tokio::spawn(async move { server.open().await });

    // ── 5. Wait for SIGINT or the server stopping ───────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
        _ = stop_rx.recv() => {
            warn!("HTTP server stopped on its own");
        }
    }

    adapter.close().await;
    let _ = server_handle.await;

    info!("Shutdown complete");
    Ok(())
}

/// Stand-in for the application's own routes.
fn demo_router() -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/hello/:name",
            get(|Path(name): Path<String>| async move { format!("hello, {name}") }),
        )
        .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
}
