//! HTTP surface: configuration, routing, middleware, handlers, and lifecycle.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod module;
pub mod shutdown;

pub use config::*;
pub use error::ApiError;
pub use extract::CalcBody;
pub use handlers::AppState;
pub use module::{build_router, ServerModule};
pub use shutdown::*;
