//! Calculator Core — operand coercion, the operation set, and request dispatch.
//!
//! Everything here is pure and synchronous; HTTP concerns live in the server
//! crate.

pub mod dispatch;
pub mod error;
pub mod number;
pub mod operation;

pub use dispatch::{compute, dispatch, OperationRequest, OperationResult};
pub use error::CalcError;
pub use number::{coerce, to_json_number, NotANumber};
pub use operation::{Operation, UnknownOperation};
