//! HTTP handler definitions for the calculator server.
//!
//! This module defines `AppState` (the shared state carried through axum
//! extractors) and re-exports all handler functions for convenient access
//! when building the router.

pub mod banner;
pub mod calculate;
pub mod health;
pub mod metrics;

pub use self::banner::{banner_handler, BANNER};
pub use self::calculate::{calculate_handler, exponentiate_handler, modulo_handler};
pub use self::health::{health_handler, liveness_handler, readiness_handler};
pub use self::metrics::metrics_handler;

use std::sync::Arc;

use super::{ServerConfig, ShutdownController};
use crate::telemetry::Telemetry;

/// Shared application state passed to all axum handlers via `State` extraction.
///
/// Holds `Arc` references so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Request, error, and calculation counters plus process gauges.
    pub telemetry: Arc<Telemetry>,
    /// Lifecycle state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates state with fresh telemetry and a `Starting` lifecycle.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            telemetry: Arc::new(Telemetry::new()),
            shutdown: Arc::new(ShutdownController::new()),
            config: Arc::new(config),
        }
    }
}
