//! Consistency error types.

use std::fmt;

use serde::Serialize;
use silentwatch_core::constants::EXIT_UNTRUSTWORTHY_RUN;
use silentwatch_core::errors::error_code::{self, ErrorCode};

use crate::validator::ConsistencyViolation;

/// Fixed classification callers use to pick the exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunClassification {
    UntrustworthyRun,
}

impl RunClassification {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::UntrustworthyRun => EXIT_UNTRUSTWORTHY_RUN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UntrustworthyRun => "UNTRUSTWORTHY_RUN",
        }
    }
}

impl fmt::Display for RunClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConsistencyError {
    #[error("Execution and judgments disagree: {} violation(s)", violations.len())]
    Inconsistent { violations: Vec<ConsistencyViolation> },
}

impl ConsistencyError {
    pub fn classification(&self) -> RunClassification {
        match self {
            Self::Inconsistent { .. } => RunClassification::UntrustworthyRun,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.classification().exit_code()
    }

    pub fn violations(&self) -> &[ConsistencyViolation] {
        match self {
            Self::Inconsistent { violations } => violations,
        }
    }
}

impl ErrorCode for ConsistencyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Inconsistent { .. } => error_code::EXECUTION_JUDGMENT_INCONSISTENT,
        }
    }
}

pub type ConsistencyResult<T> = Result<T, ConsistencyError>;
