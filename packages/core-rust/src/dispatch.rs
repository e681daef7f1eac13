//! Request validation and operation dispatch.
//!
//! Two entry points, one per endpoint family:
//!
//! - [`dispatch`] backs the generic endpoint. Checks run strictly in order
//!   (`num1`, then `num2`, then the operation selector) and the first failure
//!   wins.
//! - [`compute`] backs the dedicated endpoints. Both operands are validated
//!   as one check; modulo additionally rejects a zero divisor.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CalcError;
use crate::number::{coerce, serialize_number};
use crate::operation::Operation;

/// A decoded calculation request. Every field is optional and loosely typed;
/// validation happens in [`dispatch`] / [`compute`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OperationRequest {
    /// First operand (base / dividend).
    #[serde(default)]
    pub num1: Option<Value>,
    /// Second operand (exponent / divisor).
    #[serde(default)]
    pub num2: Option<Value>,
    /// Operation selector. Only read by the generic endpoint.
    #[serde(default)]
    pub operation: Option<Value>,
}

impl OperationRequest {
    /// Builds a request from two operands and no selector.
    #[must_use]
    pub fn operands(num1: impl Into<Value>, num2: impl Into<Value>) -> Self {
        Self {
            num1: Some(num1.into()),
            num2: Some(num2.into()),
            operation: None,
        }
    }

    /// Sets the operation selector.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<Value>) -> Self {
        self.operation = Some(operation.into());
        self
    }
}

/// Success payload of the dedicated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperationResult {
    /// Result label, e.g. `"exponentiation"` or `"modulo"`.
    pub operation: &'static str,
    #[serde(serialize_with = "serialize_number")]
    pub num1: f64,
    #[serde(serialize_with = "serialize_number")]
    pub num2: f64,
    #[serde(serialize_with = "serialize_number")]
    pub result: f64,
}

/// Validates a generic-endpoint request and computes its result.
///
/// # Errors
///
/// - [`CalcError::InvalidNum1`] if `num1` is not numeric.
/// - [`CalcError::InvalidNum2`] if `num2` is not numeric.
/// - [`CalcError::InvalidOperation`] if the selector is missing, not a
///   string, or not a known operation name.
pub fn dispatch(request: &OperationRequest) -> Result<f64, CalcError> {
    let num1 = coerce(request.num1.as_ref()).map_err(|_| CalcError::InvalidNum1)?;
    let num2 = coerce(request.num2.as_ref()).map_err(|_| CalcError::InvalidNum2)?;
    let operation = select_operation(request.operation.as_ref())?;

    let result = operation.apply(num1, num2);
    tracing::trace!(%operation, num1, num2, result, "dispatched");
    Ok(result)
}

/// Runs `operation` directly, as the dedicated endpoints do.
///
/// # Errors
///
/// - [`CalcError::InvalidOperands`] if either operand is not numeric.
/// - [`CalcError::ModuloByZero`] if `operation` is [`Operation::Mod`] and the
///   divisor is zero.
pub fn compute(
    operation: Operation,
    request: &OperationRequest,
) -> Result<OperationResult, CalcError> {
    let (Ok(num1), Ok(num2)) = (
        coerce(request.num1.as_ref()),
        coerce(request.num2.as_ref()),
    ) else {
        return Err(CalcError::InvalidOperands(operation));
    };

    if operation == Operation::Mod && num2 == 0.0 {
        return Err(CalcError::ModuloByZero);
    }

    Ok(OperationResult {
        operation: operation.label(),
        num1,
        num2,
        result: operation.apply(num1, num2),
    })
}

fn select_operation(selector: Option<&Value>) -> Result<Operation, CalcError> {
    selector
        .and_then(Value::as_str)
        .ok_or(CalcError::InvalidOperation)?
        .parse()
        .map_err(|_| CalcError::InvalidOperation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn generic(num1: Value, num2: Value, operation: &str) -> OperationRequest {
        OperationRequest::operands(num1, num2).with_operation(operation)
    }

    // ---- generic endpoint ----

    #[test]
    fn dispatch_exponentiate() {
        assert_eq!(dispatch(&generic(json!(2), json!(3), "exponentiate")), Ok(8.0));
    }

    #[test]
    fn dispatch_mod() {
        assert_eq!(dispatch(&generic(json!(10), json!(3), "mod")), Ok(1.0));
    }

    #[test]
    fn dispatch_accepts_numeric_strings() {
        assert_eq!(dispatch(&generic(json!("2"), json!("10"), "exponentiate")), Ok(1024.0));
    }

    #[test]
    fn dispatch_reports_num1_before_num2() {
        let request = generic(json!("invalid"), json!("also invalid"), "exponentiate");
        assert_eq!(dispatch(&request), Err(CalcError::InvalidNum1));
    }

    #[test]
    fn dispatch_reports_num2_before_operation() {
        let request = generic(json!(1), json!("invalid"), "nope");
        assert_eq!(dispatch(&request), Err(CalcError::InvalidNum2));
    }

    #[test]
    fn dispatch_rejects_unknown_operation() {
        assert_eq!(
            dispatch(&generic(json!(2), json!(3), "invalid")),
            Err(CalcError::InvalidOperation)
        );
    }

    #[test]
    fn dispatch_rejects_missing_operation() {
        let request = OperationRequest::operands(2, 3);
        assert_eq!(dispatch(&request), Err(CalcError::InvalidOperation));
    }

    #[test]
    fn dispatch_rejects_non_string_operation() {
        let request = OperationRequest::operands(2, 3).with_operation(json!(1));
        assert_eq!(dispatch(&request), Err(CalcError::InvalidOperation));
    }

    #[test]
    fn dispatch_mod_by_zero_is_nan_not_an_error() {
        let result = dispatch(&generic(json!(10), json!(0), "mod")).unwrap();
        assert!(result.is_nan());
    }

    #[test]
    fn dispatch_rejects_missing_operands() {
        assert_eq!(dispatch(&OperationRequest::default()), Err(CalcError::InvalidNum1));
    }

    // ---- dedicated endpoints ----

    #[test]
    fn compute_exponentiate() {
        let result = compute(Operation::Exponentiate, &OperationRequest::operands(2, 3)).unwrap();
        assert_eq!(
            result,
            OperationResult {
                operation: "exponentiation",
                num1: 2.0,
                num2: 3.0,
                result: 8.0,
            }
        );
    }

    #[test]
    fn compute_modulo() {
        let result = compute(Operation::Mod, &OperationRequest::operands(10, 3)).unwrap();
        assert_eq!(result.operation, "modulo");
        assert_eq!(result.result, 1.0);
    }

    #[test]
    fn compute_ignores_selector() {
        let request = OperationRequest::operands(10, 3).with_operation("exponentiate");
        let result = compute(Operation::Mod, &request).unwrap();
        assert_eq!(result.result, 1.0);
    }

    #[test]
    fn compute_rejects_either_invalid_operand() {
        for request in [
            OperationRequest::operands("invalid", 3),
            OperationRequest::operands(2, "invalid"),
            OperationRequest {
                num1: Some(json!(2)),
                ..OperationRequest::default()
            },
        ] {
            assert_eq!(
                compute(Operation::Exponentiate, &request),
                Err(CalcError::InvalidOperands(Operation::Exponentiate))
            );
        }
    }

    #[test]
    fn compute_modulo_rejects_zero_divisor() {
        for divisor in [json!(0), json!("0"), json!(-0.0), json!("0.000")] {
            let request = OperationRequest::operands(10, divisor);
            assert_eq!(compute(Operation::Mod, &request), Err(CalcError::ModuloByZero));
        }
    }

    #[test]
    fn compute_modulo_checks_operands_before_divisor() {
        let request = OperationRequest::operands("invalid", 0);
        assert_eq!(
            compute(Operation::Mod, &request),
            Err(CalcError::InvalidOperands(Operation::Mod))
        );
    }

    #[test]
    fn compute_exponentiate_allows_zero_exponent() {
        let result = compute(Operation::Exponentiate, &OperationRequest::operands(5, 0)).unwrap();
        assert_eq!(result.result, 1.0);
    }

    #[test]
    fn operation_result_serializes_integral_values_as_integers() {
        let result = compute(Operation::Exponentiate, &OperationRequest::operands(2, 3)).unwrap();
        assert_eq!(
            serde_json::to_value(result).unwrap(),
            json!({"operation": "exponentiation", "num1": 2, "num2": 3, "result": 8})
        );
    }

    #[test]
    fn operation_result_serializes_nan_as_null() {
        let result = compute(Operation::Exponentiate, &OperationRequest::operands(-8, 0.5)).unwrap();
        assert_eq!(serde_json::to_value(result).unwrap()["result"], Value::Null);
    }

    #[test]
    fn request_deserializes_with_missing_fields() {
        let request: OperationRequest = serde_json::from_value(json!({"num1": 2})).unwrap();
        assert_eq!(request.num1, Some(json!(2)));
        assert_eq!(request.num2, None);
        assert_eq!(request.operation, None);
    }

    // ---- properties ----

    proptest! {
        #[test]
        fn exponentiate_matches_powf(a in -1.0e3f64..1.0e3, b in -8.0f64..8.0) {
            let result = compute(Operation::Exponentiate, &OperationRequest::operands(a, b)).unwrap();
            let expected = a.powf(b);
            prop_assert!(
                result.result.to_bits() == expected.to_bits()
                    || (result.result.is_nan() && expected.is_nan())
            );
        }

        #[test]
        fn modulo_matches_truncating_remainder(a in -1.0e6f64..1.0e6, b in -1.0e3f64..1.0e3) {
            prop_assume!(b != 0.0);
            let result = compute(Operation::Mod, &OperationRequest::operands(a, b)).unwrap();
            prop_assert_eq!(result.result.to_bits(), (a % b).to_bits());
            // Sign follows the dividend.
            prop_assert!(result.result == 0.0 || result.result.signum() == a.signum());
        }

        #[test]
        fn generic_and_dedicated_agree(a in -100i32..100, b in 1i32..10) {
            for op in Operation::ALL {
                let request = OperationRequest::operands(a, b).with_operation(op.name());
                let generic = dispatch(&request).unwrap();
                let dedicated = compute(op, &request).unwrap().result;
                prop_assert_eq!(generic.to_bits(), dedicated.to_bits());
            }
        }

        #[test]
        fn string_operands_coerce_like_numbers(a in -1.0e6f64..1.0e6, b in 1.0f64..50.0) {
            let numeric = OperationRequest::operands(a, b).with_operation("mod");
            let textual = OperationRequest::operands(a.to_string(), b.to_string())
                .with_operation("mod");
            prop_assert_eq!(dispatch(&numeric), dispatch(&textual));
        }
    }
}
