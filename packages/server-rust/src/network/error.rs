//! Mapping of dispatcher errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use calculator_core::CalcError;
use serde::Serialize;

/// A rejected calculation, tagged with the surface its endpoint uses.
///
/// The generic endpoint answers with plain text; the dedicated endpoints
/// answer with a JSON `{"error": ...}` object. Both use 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Rendered as a `text/plain` body.
    #[error("{0}")]
    Text(CalcError),
    /// Rendered as `{"error": "<message>"}`.
    #[error("{0}")]
    Json(CalcError),
}

/// JSON body of a dedicated-endpoint rejection.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Text(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            Self::Json(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: err.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
