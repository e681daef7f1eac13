//! Validation errors produced by the dispatcher.

use crate::operation::Operation;

/// Why a calculation request was rejected.
///
/// The `Display` text is the exact message returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// Generic endpoint: `num1` did not coerce to a number.
    #[error("Num1 is not a valid number")]
    InvalidNum1,
    /// Generic endpoint: `num2` did not coerce to a number.
    #[error("Num2 is not a valid number")]
    InvalidNum2,
    /// Dedicated endpoint: at least one operand did not coerce.
    #[error("{} must be valid numbers", .0.operand_names())]
    InvalidOperands(Operation),
    /// Generic endpoint: operation selector missing or not recognised.
    #[error("Invalid operation.")]
    InvalidOperation,
    /// Modulo endpoint: the divisor is zero.
    #[error("Cannot perform modulo by zero")]
    ModuloByZero,
}

impl CalcError {
    /// Short machine-readable name, used as a log field.
    #[must_use]
    pub fn kind(self) -> &'static str {
        match self {
            Self::InvalidNum1 => "invalid_num1",
            Self::InvalidNum2 => "invalid_num2",
            Self::InvalidOperands(_) => "invalid_operands",
            Self::InvalidOperation => "invalid_operation",
            Self::ModuloByZero => "modulo_by_zero",
        }
    }
}
