//! The four consistency rules.
//!
//! Violations come out in a fixed order: judgments in input order first,
//! then executions in input order.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::Serialize;
use silentwatch_core::types::{ExecutionRecord, Judgment};
use tracing::warn;

use crate::errors::{ConsistencyError, ConsistencyResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    JudgmentWithoutExecution,
    ExecutionWithoutJudgment,
    JudgmentForSkipped,
    MissingObservationAcknowledgment,
}

impl ViolationCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JudgmentWithoutExecution => "JUDGMENT_WITHOUT_EXECUTION",
            Self::ExecutionWithoutJudgment => "EXECUTION_WITHOUT_JUDGMENT",
            Self::JudgmentForSkipped => "JUDGMENT_FOR_SKIPPED",
            Self::MissingObservationAcknowledgment => "MISSING_OBSERVATION_ACKNOWLEDGMENT",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyViolation {
    pub code: ViolationCode,
    pub promise_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub valid: bool,
    pub violations: Vec<ConsistencyViolation>,
}

/// Check every execution record against every judgment. Never fails; the
/// report says whether the run is consistent.
pub fn validate(executions: &[ExecutionRecord], judgments: &[Judgment]) -> ConsistencyReport {
    // First record wins if a promise id repeats.
    let mut by_promise: FxHashMap<&str, &ExecutionRecord> = FxHashMap::default();
    for record in executions {
        by_promise.entry(record.promise_id.as_str()).or_insert(record);
    }
    let mut judgment_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for judgment in judgments {
        *judgment_counts.entry(judgment.promise_id.as_str()).or_default() += 1;
    }

    let mut violations = Vec::new();
    let mut push = |code: ViolationCode, promise_id: &str, message: String| {
        violations.push(ConsistencyViolation {
            code,
            promise_id: promise_id.to_string(),
            message,
        });
    };

    for judgment in judgments {
        let id = judgment.promise_id.as_str();
        match by_promise.get(id) {
            Some(record) if record.skipped => push(
                ViolationCode::JudgmentForSkipped,
                id,
                match &record.skip_reason {
                    Some(reason) => format!("Promise '{id}' was skipped ({reason}) but has a judgment"),
                    None => format!("Promise '{id}' was skipped but has a judgment"),
                },
            ),
            Some(record) if !record.attempted => push(
                ViolationCode::JudgmentWithoutExecution,
                id,
                format!("Promise '{id}' has a judgment but was never attempted"),
            ),
            Some(record) => {
                if !record.observed && judgment.outcome.claims_fulfilled() {
                    push(
                        ViolationCode::MissingObservationAcknowledgment,
                        id,
                        format!("Promise '{id}' was not observed but its judgment claims it was fulfilled"),
                    );
                }
            }
            None => push(
                ViolationCode::JudgmentWithoutExecution,
                id,
                format!("Promise '{id}' has a judgment but no execution record"),
            ),
        }
    }

    // Input order, first record per promise only.
    let first_records = executions
        .iter()
        .filter(|r| by_promise.get(r.promise_id.as_str()).is_some_and(|first| std::ptr::eq(*first, *r)));
    for record in first_records.filter(|r| r.requires_judgment()) {
        let id = record.promise_id.as_str();
        match judgment_counts.get(id).copied().unwrap_or(0) {
            1 => {}
            0 => push(
                ViolationCode::ExecutionWithoutJudgment,
                id,
                format!("Promise '{id}' was attempted but has no judgment"),
            ),
            n => push(
                ViolationCode::ExecutionWithoutJudgment,
                id,
                format!("Promise '{id}' was attempted but has {n} judgments, expected exactly one"),
            ),
        }
    }

    for v in &violations {
        warn!(code = %v.code, promise_id = %v.promise_id, "{}", v.message);
    }

    ConsistencyReport {
        valid: violations.is_empty(),
        violations,
    }
}

/// Validate, and fail the run on any violation.
pub fn enforce(executions: &[ExecutionRecord], judgments: &[Judgment]) -> ConsistencyResult<()> {
    let report = validate(executions, judgments);
    if report.valid {
        Ok(())
    } else {
        Err(ConsistencyError::Inconsistent {
            violations: report.violations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silentwatch_core::types::JudgmentOutcome;

    fn exec(id: &str, attempted: bool, observed: bool, skipped: bool) -> ExecutionRecord {
        ExecutionRecord {
            promise_id: id.into(),
            attempted,
            observed,
            skipped,
            skip_reason: None,
        }
    }

    fn judge(id: &str, outcome: JudgmentOutcome) -> Judgment {
        Judgment {
            promise_id: id.into(),
            judgment: None,
            outcome,
        }
    }

    #[test]
    fn attempted_without_judgment_is_exactly_one_violation() {
        let report = validate(&[exec("p1", true, false, false)], &[]);
        assert!(!report.valid);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].code, ViolationCode::ExecutionWithoutJudgment);
        assert_eq!(report.violations[0].promise_id, "p1");
    }

    #[test]
    fn empty_scan_is_valid() {
        assert!(validate(&[], &[]).valid);
    }

    #[test]
    fn skipped_takes_precedence_over_not_attempted() {
        let report = validate(
            &[exec("p1", false, false, true)],
            &[judge("p1", JudgmentOutcome::SilentFailure)],
        );
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].code, ViolationCode::JudgmentForSkipped);
    }

    #[test]
    fn duplicate_execution_records_use_the_first() {
        let report = validate(
            &[
                exec("p1", true, false, false),
                exec("p1", true, false, false),
                exec("p1", false, false, true),
            ],
            &[],
        );
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].code, ViolationCode::ExecutionWithoutJudgment);

        // First record skipped: later attempted duplicates need no judgment.
        let report = validate(&[exec("p2", false, false, true), exec("p2", true, false, false)], &[]);
        assert!(report.valid);
    }

    #[test]
    fn duplicate_judgments_are_reported_once_per_execution() {
        let report = validate(
            &[exec("p1", true, true, false)],
            &[judge("p1", JudgmentOutcome::Fulfilled), judge("p1", JudgmentOutcome::Fulfilled)],
        );
        assert_eq!(report.violations.len(), 1);
        assert!(report.violations[0].message.contains("2 judgments"));
    }
}
