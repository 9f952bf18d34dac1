//! HTTP Adapter - Composition and Server Lifecycle
//!
//! Wraps an arbitrary axum `Router` with request instrumentation and
//! mounts `/health`, `/version` and `/metrics` in front of it. Owns the
//! listening socket: `open` serves until `close` triggers a graceful
//! shutdown that drains in-flight requests.
//!
//! An adapter serves once. After `close` the shutdown signal stays
//! raised, so a later `open` stops as soon as it starts.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use axum::routing::get;
use axum::Router;
use prometheus::Registry;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::endpoints::{self, EndpointState};
use super::instrument::{instrument, Instrumentation};
use super::route::MatchedPathResolver;
use crate::adapters::metrics::HttpMetrics;
use crate::config::ServerConfig;
use crate::domain::health::HealthState;
use crate::ports::adapter::Adapter;
use crate::ports::logger::Logger;
use crate::ports::route::RouteResolver;

/// HTTP server adapter around a wrapped handler.
pub struct HttpAdapter {
    /// Configured listening port (`0` = ephemeral).
    port: u16,
    /// Reported on `/version`.
    version: Arc<str>,
    /// Per-request timeout for the wrapped handler.
    request_timeout: Duration,
    /// Optional bound on graceful shutdown.
    shutdown_timeout: Option<Duration>,
    /// The wrapped business handler.
    handler: Router,
    /// Route template lookup for the `handler` label.
    resolver: Arc<dyn RouteResolver>,
    /// Readiness flag and retained error.
    health: Arc<HealthState>,
    /// Request counter and latency histogram.
    metrics: HttpMetrics,
    /// Lifecycle reporting.
    logger: Arc<dyn Logger>,
    /// Raised once by `close`.
    shutdown_tx: watch::Sender<bool>,
    /// True while the serve loop runs.
    serving_tx: watch::Sender<bool>,
    /// Address actually bound, once listening.
    local_addr_tx: watch::Sender<Option<SocketAddr>>,
    /// Supervisor's stop channel, signalled when serving ends.
    stop_tx: Mutex<Option<broadcast::Sender<()>>>,
}

impl HttpAdapter {
    /// Build an adapter whose collectors live in the process-wide
    /// default Prometheus registry.
    ///
    /// Only one adapter per process can be built this way; a second
    /// one fails with [`AdapterError::Metrics`].
    pub fn new(
        handler: Router,
        config: &ServerConfig,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, AdapterError> {
        Self::with_registry(
            handler,
            config,
            prometheus::default_registry().clone(),
            logger,
        )
    }

    /// Build an adapter registering its collectors in `registry`.
    pub fn with_registry(
        handler: Router,
        config: &ServerConfig,
        registry: Registry,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, AdapterError> {
        let metrics = HttpMetrics::new(registry)?;

        Ok(Self {
            port: config.port,
            version: Arc::from(config.version.as_str()),
            request_timeout: config.request_timeout(),
            shutdown_timeout: config.shutdown_timeout(),
            handler,
            resolver: Arc::new(MatchedPathResolver),
            health: Arc::new(HealthState::new()),
            metrics,
            logger,
            shutdown_tx: watch::Sender::new(false),
            serving_tx: watch::Sender::new(false),
            local_addr_tx: watch::Sender::new(None),
            stop_tx: Mutex::new(None),
        })
    }

    /// Replace the route template lookup used for metric labels.
    #[must_use]
    pub fn with_route_resolver(mut self, resolver: Arc<dyn RouteResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// The composed router: auxiliary endpoints first, everything else
    /// to the instrumented wrapped handler.
    pub fn router(&self) -> Router {
        let instrumentation =
            Instrumentation::new(self.metrics.clone(), Arc::clone(&self.resolver));
        let instrumented =
            instrument(self.handler.clone(), instrumentation, self.request_timeout);

        let endpoint_state = EndpointState {
            health: Arc::clone(&self.health),
            version: Arc::clone(&self.version),
            metrics: self.metrics.clone(),
        };

        Router::new()
            .route("/health", get(endpoints::health))
            .route("/version", get(endpoints::version))
            .route("/metrics", get(endpoints::metrics))
            .with_state(endpoint_state)
            .fallback_service(instrumented)
            .layer(TraceLayer::new_for_http())
    }

    /// Shared health state, for failure detectors that hold it directly.
    pub fn health(&self) -> Arc<HealthState> {
        Arc::clone(&self.health)
    }

    /// Request collectors.
    pub const fn metrics(&self) -> &HttpMetrics {
        &self.metrics
    }

    /// Reported version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Bound address, once listening.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr_tx.borrow()
    }

    /// Wait until the listener is bound and return its address.
    ///
    /// Never resolves if binding fails.
    pub async fn wait_until_listening(&self) -> Option<SocketAddr> {
        let mut addr_rx = self.local_addr_tx.subscribe();
        addr_rx.wait_for(Option::is_some).await.ok().and_then(|addr| *addr)
    }

    /// Whether the serve loop is currently running.
    pub fn is_serving(&self) -> bool {
        *self.serving_tx.borrow()
    }

    /// Bind and serve until shutdown, returning errors instead of
    /// treating them as fatal.
    ///
    /// A shutdown initiated by `close` is a normal `Ok(())` return.
    pub async fn serve(&self) -> Result<(), AdapterError> {
        self.serving_tx.send_replace(true);
        let result = self.bind_and_serve().await;
        self.serving_tx.send_replace(false);
        self.signal_stop();
        result
    }

    async fn bind_and_serve(&self) -> Result<(), AdapterError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| AdapterError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| AdapterError::Bind { addr, source })?;

        self.local_addr_tx.send_replace(Some(local_addr));
        self.logger
            .info(&format!("Listening on http://{local_addr}"));

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            })
            .await
            .map_err(AdapterError::Serve)
    }

    /// Wait for the serve loop to finish, bounded by the shutdown
    /// timeout when one is configured.
    async fn wait_until_stopped(&self) -> Result<(), AdapterError> {
        let mut serving_rx = self.serving_tx.subscribe();
        let drained = async move {
            serving_rx
                .wait_for(|serving| !*serving)
                .await
                .map(|_| ())
                .map_err(|_| AdapterError::StateClosed)
        };

        match self.shutdown_timeout {
            Some(limit) => tokio::time::timeout(limit, drained)
                .await
                .map_err(|_| AdapterError::ShutdownTimeout(limit))?,
            None => drained.await,
        }
    }

    fn signal_stop(&self) {
        let stop_tx = self
            .stop_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(tx) = stop_tx {
            if tx.send(()).is_err() {
                debug!("Stop channel has no receivers");
            }
        }
    }
}

#[async_trait]
impl Adapter for HttpAdapter {
    #[tracing::instrument(skip(self))]
    async fn open(&self) {
        if let Err(e) = self.serve().await {
            self.logger.fatal(&e.to_string());
        }
    }

    #[tracing::instrument(skip(self))]
    async fn close(&self) {
        self.shutdown_tx.send_replace(true);

        match self.wait_until_stopped().await {
            Ok(()) => self.logger.info("HTTP server stopped"),
            Err(e) => self
                .logger
                .error(&format!("HTTP server shutdown failed: {e}")),
        }
    }

    fn notify_stop(&self, stop_tx: broadcast::Sender<()>) {
        *self.stop_tx.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(stop_tx);
    }

    fn on_failure(&self, err: Option<anyhow::Error>) {
        let Some(err) = err else {
            return;
        };

        let reason = err.to_string();
        self.health.record_failure(Some(err));
        self.logger.error(&format!("Marked unhealthy: {reason}"));
    }
}

/// Errors raised while building or running the adapter.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Collectors could not be registered.
    #[error("failed to register metrics: {0}")]
    Metrics(#[from] prometheus::Error),

    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// In-flight requests did not drain in time.
    #[error("graceful shutdown did not complete within {0:?}")]
    ShutdownTimeout(Duration),

    /// The serve-state channel closed unexpectedly.
    #[error("server state channel closed")]
    StateClosed,
}
