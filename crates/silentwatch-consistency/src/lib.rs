//! # silentwatch-consistency
//!
//! Execution–judgment consistency for a completed scan: every attempted,
//! unskipped execution has exactly one judgment, and every judgment points
//! at such an execution. Any mismatch makes the whole run untrustworthy.

pub mod errors;
pub mod validator;

pub use errors::{ConsistencyError, ConsistencyResult, RunClassification};
pub use validator::{enforce, validate, ConsistencyReport, ConsistencyViolation, ViolationCode};
