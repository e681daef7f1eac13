//! Calculator Server — axum HTTP surface over the calculator core, with
//! health probes and Prometheus telemetry.

pub mod network;
pub mod telemetry;

pub use network::{build_router, AppState, ServerConfig, ServerModule};
pub use telemetry::Telemetry;
