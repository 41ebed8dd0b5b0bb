//! Stable, machine-readable error codes.

/// Every error enum in the workspace maps each variant to a stable code.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_PARSE_ERROR: &str = "CONFIG_PARSE_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const POLICY_NOT_FOUND: &str = "POLICY_NOT_FOUND";
pub const POLICY_PARSE_ERROR: &str = "POLICY_PARSE_ERROR";
pub const POLICY_INVALID: &str = "POLICY_INVALID";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const EXECUTION_JUDGMENT_INCONSISTENT: &str = "EXECUTION_JUDGMENT_INCONSISTENT";
