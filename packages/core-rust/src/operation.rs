//! The closed set of arithmetic operations.

use std::fmt;
use std::str::FromStr;

/// A binary arithmetic operation the calculator can perform.
///
/// Selected by name on the generic endpoint (`"exponentiate"`, `"mod"`) and
/// invoked directly by the dedicated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `num1` raised to the power `num2` (IEEE 754 `pow`).
    Exponentiate,
    /// Truncating remainder of `num1 / num2`; the sign follows the dividend.
    Mod,
}

impl Operation {
    /// Every supported operation, in selector order.
    pub const ALL: [Operation; 2] = [Operation::Exponentiate, Operation::Mod];

    /// Selector name accepted by the generic endpoint.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Exponentiate => "exponentiate",
            Self::Mod => "mod",
        }
    }

    /// Label reported in the `operation` field of a dedicated-endpoint result.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Exponentiate => "exponentiation",
            Self::Mod => "modulo",
        }
    }

    /// Human names of the two operands, used in validation messages.
    #[must_use]
    pub fn operand_names(self) -> &'static str {
        match self {
            Self::Exponentiate => "Base and exponent",
            Self::Mod => "Dividend and divisor",
        }
    }

    /// Applies the operation. Never fails: edge cases follow `f64` semantics
    /// (`(-8.0).powf(0.5)` and `x % 0.0` are both NaN).
    #[must_use]
    pub fn apply(self, num1: f64, num2: f64) -> f64 {
        match self {
            Self::Exponentiate => num1.powf(num2),
            Self::Mod => num1 % num2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a selector does not name a supported operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation: {0:?}")]
pub struct UnknownOperation(pub String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    /// Exact, case-sensitive match on the selector name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}
