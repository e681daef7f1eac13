//! Request body extraction for the calculation endpoints.
//!
//! Bodies may be JSON or URL-encoded forms. Anything else (including no
//! body at all) decodes to an empty request so that validation, not the
//! extractor, reports what is missing.
//!
//! A JSON body must be an object or an array. An array carries no named
//! fields, so it decodes to an empty request. Other top-level values are
//! rejected with 400.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use calculator_core::OperationRequest;
use serde_json::Value;

/// Extracts an [`OperationRequest`] from a JSON or form body.
#[derive(Debug, Clone, Default)]
pub struct CalcBody(pub OperationRequest);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return BodyKind::Other;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        BodyKind::Json
    } else if essence == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

impl<S> FromRequest<S> for CalcBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(req.headers()) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Self::default());
                }
                let Json(value) =
                    Json::<Value>::from_bytes(&bytes).map_err(IntoResponse::into_response)?;
                from_json_value(value).map(Self)
            }
            BodyKind::Form => {
                let Form(body) = Form::<OperationRequest>::from_request(req, state)
                    .await
                    .map_err(IntoResponse::into_response)?;
                Ok(Self(body))
            }
            BodyKind::Other => Ok(Self::default()),
        }
    }
}

fn from_json_value(value: Value) -> Result<OperationRequest, Response> {
    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()).into_response()),
        Value::Array(_) => Ok(OperationRequest::default()),
        _ => Err((
            StatusCode::BAD_REQUEST,
            "Request body must be a JSON object",
        )
            .into_response()),
    }
}
