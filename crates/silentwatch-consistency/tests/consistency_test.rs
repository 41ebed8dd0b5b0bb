//! T6-CON-01 through T6-CON-07: execution–judgment consistency.

use proptest::prelude::*;
use silentwatch_consistency::{enforce, validate, ConsistencyError, RunClassification, ViolationCode};
use silentwatch_core::types::{ExecutionRecord, Judgment, JudgmentOutcome};
use silentwatch_core::ErrorCode;

fn exec(id: &str, attempted: bool, observed: bool, skipped: bool) -> ExecutionRecord {
    ExecutionRecord {
        promise_id: id.into(),
        attempted,
        observed,
        skipped,
        skip_reason: skipped.then(|| "out of scope".to_string()),
    }
}

fn judge(id: &str, outcome: JudgmentOutcome) -> Judgment {
    Judgment {
        promise_id: id.into(),
        judgment: Some("network_silent_failure".into()),
        outcome,
    }
}

#[test]
fn t6_con_01_attempted_unobserved_without_judgment() {
    let report = validate(&[exec("p1", true, false, false)], &[]);
    assert!(!report.valid);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].code, ViolationCode::ExecutionWithoutJudgment);
}

#[test]
fn t6_con_02_judgment_without_execution() {
    let report = validate(
        &[exec("p1", false, false, false)],
        &[judge("p1", JudgmentOutcome::SilentFailure), judge("ghost", JudgmentOutcome::Inconclusive)],
    );
    let codes: Vec<_> = report.violations.iter().map(|v| (v.code, v.promise_id.as_str())).collect();
    assert_eq!(
        codes,
        vec![
            (ViolationCode::JudgmentWithoutExecution, "p1"),
            (ViolationCode::JudgmentWithoutExecution, "ghost"),
        ]
    );
}

#[test]
fn t6_con_03_judgment_for_skipped() {
    let report = validate(
        &[exec("p1", true, false, true)],
        &[judge("p1", JudgmentOutcome::Unobserved)],
    );
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].code, ViolationCode::JudgmentForSkipped);
    assert!(report.violations[0].message.contains("out of scope"));
}

#[test]
fn t6_con_04_unobserved_cannot_be_fulfilled() {
    let executions = [exec("p1", true, false, false)];
    let report = validate(&executions, &[judge("p1", JudgmentOutcome::Fulfilled)]);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].code, ViolationCode::MissingObservationAcknowledgment);

    assert!(validate(&executions, &[judge("p1", JudgmentOutcome::Unobserved)]).valid);
}

#[test]
fn t6_con_05_consistent_scan_passes_enforce() {
    let executions = [
        exec("p1", true, true, false),
        exec("p2", true, false, false),
        exec("p3", false, false, true),
    ];
    let judgments = [
        judge("p1", JudgmentOutcome::Fulfilled),
        judge("p2", JudgmentOutcome::SilentFailure),
    ];
    assert!(enforce(&executions, &judgments).is_ok());
}

#[test]
fn t6_con_06_enforce_raises_untrustworthy_run() {
    let err = enforce(&[exec("p1", true, false, false)], &[]).unwrap_err();
    assert_eq!(err.classification(), RunClassification::UntrustworthyRun);
    assert_eq!(err.exit_code(), 70);
    assert_eq!(err.error_code(), "EXECUTION_JUDGMENT_INCONSISTENT");
    let ConsistencyError::Inconsistent { violations } = &err;
    assert_eq!(violations.len(), 1);
    assert!(err.to_string().contains("1 violation"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// One judgment per attempted, unskipped execution, none otherwise,
    /// never claiming an unobserved promise: always valid.
    #[test]
    fn t6_con_07_well_formed_scans_are_valid(
        flags in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 0..40),
    ) {
        let executions: Vec<ExecutionRecord> = flags
            .iter()
            .enumerate()
            .map(|(i, (attempted, observed, skipped))| exec(&format!("p{i}"), *attempted, *observed, *skipped))
            .collect();
        let judgments: Vec<Judgment> = executions
            .iter()
            .filter(|e| e.requires_judgment())
            .map(|e| {
                let outcome = if e.observed { JudgmentOutcome::Fulfilled } else { JudgmentOutcome::Unobserved };
                judge(&e.promise_id, outcome)
            })
            .collect();

        let report = validate(&executions, &judgments);
        prop_assert!(report.valid, "{:?}", report.violations);
    }
}
