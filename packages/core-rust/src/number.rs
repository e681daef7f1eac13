//! Number conversions at the edge of the dispatcher.
//!
//! Request operands arrive as loosely typed JSON values (a number, a numeric
//! string, or nothing at all). [`coerce`] turns them into strict finite `f64`
//! values; [`to_json_number`] renders computed values back out so that
//! integral results print as integers (`8`, not `8.0`).

use serde::Serializer;
use serde_json::Value;

/// Largest integer an `f64` represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Returned when a raw operand does not coerce to a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value is not a valid number")]
pub struct NotANumber;

/// Coerces a raw request operand into a finite `f64`.
///
/// - JSON numbers pass through.
/// - Strings are trimmed and parsed as decimal float literals.
/// - Absent values, `null`, booleans, arrays and objects are rejected.
///
/// Non-finite results (`"inf"`, `"NaN"`, `"1e999"`) are rejected as well, so
/// a successful coercion always yields a finite number. No range clamping is
/// applied.
///
/// # Errors
///
/// Returns [`NotANumber`] when the value is missing or not numeric.
///
/// # Examples
///
/// ```
/// use calculator_core::number::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce(Some(&json!(2))), Ok(2.0));
/// assert_eq!(coerce(Some(&json!(" 2.5 "))), Ok(2.5));
/// assert!(coerce(Some(&json!("invalid"))).is_err());
/// assert!(coerce(None).is_err());
/// ```
pub fn coerce(raw: Option<&Value>) -> Result<f64, NotANumber> {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_decimal(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).ok_or(NotANumber)
}

fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Renders an `f64` as a JSON value.
///
/// Integral values inside the exactly representable range become JSON
/// integers. Non-finite values become `null`.
#[must_use]
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub fn to_json_number(value: f64) -> Value {
    if value.is_finite() && value.trunc() == value && value.abs() <= MAX_SAFE_INTEGER {
        return Value::from(value as i64);
    }
    Value::from(value)
}

/// `serialize_with` adapter for `f64` fields rendered via [`to_json_number`].
///
/// # Errors
///
/// Propagates the serializer's error.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serde::Serialize::serialize(&to_json_number(*value), serializer)
}
