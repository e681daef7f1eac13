//! Calculation endpoints: the generic `POST /` and the dedicated
//! `POST /exponentiate` and `POST /modulo`.
//!
//! Every rejection advances the error counter once and every computed result
//! advances the calculation counter once.

use axum::extract::State;
use axum::Json;
use calculator_core::{
    compute, dispatch, to_json_number, CalcError, Operation, OperationRequest, OperationResult,
};
use serde_json::{json, Value};
use tracing::debug;

use super::AppState;
use crate::network::error::ApiError;
use crate::network::extract::CalcBody;
use crate::telemetry::Telemetry;

/// Generic dispatch: `{num1, num2, operation}` -> `{result}`.
///
/// Rejections are plain text.
///
/// # Errors
///
/// Returns [`ApiError::Text`] when an operand or the operation selector is
/// invalid.
pub async fn calculate_handler(
    State(state): State<AppState>,
    CalcBody(request): CalcBody,
) -> Result<Json<Value>, ApiError> {
    let result =
        record_outcome(&state.telemetry, dispatch(&request)).map_err(ApiError::Text)?;
    Ok(Json(json!({ "result": to_json_number(result) })))
}

/// `POST /exponentiate`: `{num1, num2}` -> `{operation, num1, num2, result}`.
///
/// # Errors
///
/// Returns [`ApiError::Json`] when either operand is invalid.
pub async fn exponentiate_handler(
    State(state): State<AppState>,
    CalcBody(request): CalcBody,
) -> Result<Json<OperationResult>, ApiError> {
    run_dedicated(&state, Operation::Exponentiate, &request)
}

/// `POST /modulo`: `{num1, num2}` -> `{operation, num1, num2, result}`.
///
/// # Errors
///
/// Returns [`ApiError::Json`] when either operand is invalid or the divisor
/// is zero.
pub async fn modulo_handler(
    State(state): State<AppState>,
    CalcBody(request): CalcBody,
) -> Result<Json<OperationResult>, ApiError> {
    run_dedicated(&state, Operation::Mod, &request)
}

fn run_dedicated(
    state: &AppState,
    operation: Operation,
    request: &OperationRequest,
) -> Result<Json<OperationResult>, ApiError> {
    record_outcome(&state.telemetry, compute(operation, request))
        .map(Json)
        .map_err(ApiError::Json)
}

fn record_outcome<T>(
    telemetry: &Telemetry,
    outcome: Result<T, CalcError>,
) -> Result<T, CalcError> {
    match &outcome {
        Ok(_) => telemetry.record_calculation(),
        Err(err) => {
            telemetry.record_error();
            debug!(kind = err.kind(), error = %err, "calculation rejected");
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ServerConfig;

    fn test_state() -> AppState {
        AppState::new(ServerConfig::default())
    }

    fn counter(state: &AppState, name: &str) -> u64 {
        state
            .telemetry
            .render()
            .lines()
            .find_map(|line| line.strip_prefix(name)?.strip_prefix(' ')?.parse().ok())
            .unwrap_or_else(|| panic!("no sample for {name}"))
    }

    #[tokio::test]
    async fn generic_exponentiate() {
        let state = test_state();
        let request = OperationRequest::operands(2, 3).with_operation("exponentiate");

        let Json(response) = calculate_handler(State(state.clone()), CalcBody(request))
            .await
            .unwrap();

        assert_eq!(response, json!({"result": 8}));
        assert_eq!(counter(&state, "calculations_total"), 1);
        assert_eq!(counter(&state, "http_errors_total"), 0);
    }

    #[tokio::test]
    async fn generic_mod() {
        let request = OperationRequest::operands(10, 3).with_operation("mod");
        let Json(response) = calculate_handler(State(test_state()), CalcBody(request))
            .await
            .unwrap();
        assert_eq!(response["result"], 1);
    }

    #[tokio::test]
    async fn generic_mod_by_zero_renders_null() {
        let request = OperationRequest::operands(10, 0).with_operation("mod");
        let Json(response) = calculate_handler(State(test_state()), CalcBody(request))
            .await
            .unwrap();
        assert_eq!(response["result"], Value::Null);
    }

    #[tokio::test]
    async fn generic_rejection_is_text_and_counted() {
        let state = test_state();
        let request = OperationRequest::operands(2, 3).with_operation("invalid");

        let err = calculate_handler(State(state.clone()), CalcBody(request))
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Text(CalcError::InvalidOperation));
        assert_eq!(counter(&state, "http_errors_total"), 1);
        assert_eq!(counter(&state, "calculations_total"), 0);
    }

    #[tokio::test]
    async fn generic_reports_num1_first() {
        let request = OperationRequest::operands("invalid", "invalid").with_operation("mod");
        let err = calculate_handler(State(test_state()), CalcBody(request))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Text(CalcError::InvalidNum1));
    }

    #[tokio::test]
    async fn exponentiate_returns_full_result() {
        let state = test_state();
        let Json(result) = exponentiate_handler(
            State(state.clone()),
            CalcBody(OperationRequest::operands(2, 3)),
        )
        .await
        .unwrap();

        assert_eq!(result.operation, "exponentiation");
        assert_eq!(result.result, 8.0);
        assert_eq!(counter(&state, "calculations_total"), 1);
    }

    #[tokio::test]
    async fn exponentiate_rejects_invalid_operand_as_json() {
        let state = test_state();
        let err = exponentiate_handler(
            State(state.clone()),
            CalcBody(OperationRequest::operands("invalid", 3)),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            ApiError::Json(CalcError::InvalidOperands(Operation::Exponentiate))
        );
        assert_eq!(counter(&state, "http_errors_total"), 1);
    }

    #[tokio::test]
    async fn modulo_returns_full_result() {
        let Json(result) = modulo_handler(
            State(test_state()),
            CalcBody(OperationRequest::operands(10, 3)),
        )
        .await
        .unwrap();
        assert_eq!(result.operation, "modulo");
        assert_eq!(result.result, 1.0);
    }

    #[tokio::test]
    async fn modulo_rejects_zero_divisor_once() {
        let state = test_state();
        let err = modulo_handler(
            State(state.clone()),
            CalcBody(OperationRequest::operands(10, 0)),
        )
        .await
        .unwrap_err();

        assert_eq!(err, ApiError::Json(CalcError::ModuloByZero));
        assert_eq!(counter(&state, "http_errors_total"), 1);
        assert_eq!(counter(&state, "calculations_total"), 0);
    }
}
