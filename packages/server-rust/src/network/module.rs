//! Server module with deferred startup lifecycle.
//!
//! `new()` creates shared state, `start()` binds the TCP listener, and
//! `serve()` accepts connections until the shutdown future resolves.

use std::future::Future;
use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{info, warn};

use super::config::ServerConfig;
use super::handlers::{
    banner_handler, calculate_handler, exponentiate_handler, health_handler, liveness_handler,
    metrics_handler, modulo_handler, readiness_handler, AppState,
};
use super::middleware::{build_http_layers, track_requests};
use super::shutdown::ShutdownController;
use crate::telemetry::Telemetry;

/// Assembles the router for the given state.
///
/// Routes:
/// - `GET /`, `GET /api` -- text banner
/// - `POST /` -- generic dispatch
/// - `POST /exponentiate`, `POST /modulo` -- dedicated operations
/// - `GET /health`, `GET /health/live`, `GET /health/ready` -- probes
/// - `GET /metrics` -- Prometheus text
/// - anything else -- static files from `public_dir`, 404 if absent
pub fn build_router(state: AppState) -> Router {
    let layers = build_http_layers(&state.config);
    let public = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/", get(banner_handler).post(calculate_handler))
        .route("/api", get(banner_handler))
        .route("/exponentiate", post(exponentiate_handler))
        .route("/modulo", post(modulo_handler))
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .fallback_service(public)
        .layer(from_fn_with_state(state.clone(), track_requests))
        .layer(layers)
        .with_state(state)
}

/// Manages the HTTP server lifecycle.
///
/// 1. `new()` -- allocates telemetry and the shutdown controller
/// 2. `start()` -- binds the TCP listener
/// 3. `serve()` -- serves until the shutdown future resolves, then drains
pub struct ServerModule {
    state: AppState,
    listener: Option<TcpListener>,
}

impl ServerModule {
    /// Creates a server module without binding any port.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            state: AppState::new(config),
            listener: None,
        }
    }

    /// Returns a shared reference to the telemetry.
    #[must_use]
    pub fn telemetry(&self) -> Arc<Telemetry> {
        Arc::clone(&self.state.telemetry)
    }

    /// Returns a shared reference to the shutdown controller.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.state.shutdown)
    }

    /// Builds the router over this module's state.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the bound port, which differs from the configured one when
    /// port 0 is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let config = &self.state.config;
        let addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves requests until `shutdown` resolves.
    ///
    /// After the signal the lifecycle moves to `Draining`, open connections
    /// finish, and in-flight requests get up to `drain_timeout` to complete.
    ///
    /// # Errors
    ///
    /// Returns an error if `start()` was not called first or the server hits
    /// a fatal I/O error.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = self
            .listener
            .ok_or_else(|| anyhow::anyhow!("start() must be called before serve()"))?;
        let router = build_router(self.state.clone());
        let controller = Arc::clone(&self.state.shutdown);

        let signal_controller = Arc::clone(&controller);
        let signal = async move {
            shutdown.await;
            info!("Shutdown signalled, draining");
            signal_controller.trigger_shutdown();
        };

        controller.set_ready();
        info!("Serving HTTP on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(signal)
            .await?;

        // Covers a server loop that ended without the signal firing.
        controller.trigger_shutdown();
        if controller
            .wait_for_drain(self.state.config.drain_timeout)
            .await
        {
            info!("All in-flight requests completed");
        } else {
            warn!(
                in_flight = controller.in_flight_count(),
                "Drain timeout expired with in-flight requests remaining"
            );
        }
        Ok(())
    }
}
