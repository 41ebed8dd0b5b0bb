//! Confidence engine error types (thiserror).

use silentwatch_core::constants::EXIT_VALIDATION_ERROR;
use silentwatch_core::errors::error_code::{self, ErrorCode};

/// Policy file problems. Fatal at load time: a present-but-invalid file is
/// never replaced by the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("Confidence policy not found: {path}")]
    NotFound { path: String },

    #[error("Confidence policy unreadable: {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Confidence policy is not valid JSON: {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Confidence policy failed validation: {path}: {reason}")]
    Invalid { path: String, reason: String },
}

impl ErrorCode for PolicyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::POLICY_NOT_FOUND,
            Self::Read { .. } => error_code::IO_ERROR,
            Self::Parse { .. } => error_code::POLICY_PARSE_ERROR,
            Self::Invalid { .. } => error_code::POLICY_INVALID,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfidenceError {
    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Invalid confidence input: {0}")]
    InvalidInput(String),
}

impl ErrorCode for ConfidenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Policy(e) => e.error_code(),
            Self::InvalidInput(_) => error_code::INVALID_INPUT,
        }
    }
}

impl ConfidenceError {
    /// Policy and input problems are ordinary validation failures, never an
    /// untrustworthy run.
    pub fn exit_code(&self) -> i32 {
        EXIT_VALIDATION_ERROR
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report write failed: {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

pub type EngineResult<T> = Result<T, ConfidenceError>;
