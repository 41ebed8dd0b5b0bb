//! T2-POL-01 through T2-POL-07: policy loading, validation, caching, and
//! truth-lock immutability.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use silentwatch_confidence::policy::{ConfidencePolicy, PolicyCache, PolicySource, TruthLocks};
use silentwatch_confidence::{ConfidenceEngine, ConfidenceError, ConfidenceInput, PolicyError};
use silentwatch_core::config::ConfidenceConfig;
use silentwatch_core::types::{EvidencePackage, FindingType};
use silentwatch_core::ErrorCode;

fn policy_json(version: &str) -> serde_json::Value {
    json!({
        "version": version,
        "baseScores": {"PROVEN": 0.95, "OBSERVED": 0.6, "WEAK": 0.3, "UNKNOWN": 0.1},
        "thresholds": {"high": 0.85, "medium": 0.6, "low": 0.3},
        "weights": {
            "promiseStrength": 0.3,
            "observationStrength": 0.2,
            "correlationQuality": 0.2,
            "guardrails": 0.1,
            "evidenceCompleteness": 0.2
        },
        "truthLocks": {
            "evidenceCompleteRequired": false,
            "nonDeterministicMaxConfidence": 0.99,
            "guardrailsMaxNegative": 0.99
        }
    })
}

fn write_policy(dir: &Path, name: &str, body: &serde_json::Value) {
    std::fs::write(dir.join(name), body.to_string()).unwrap();
}

fn enriched_input() -> ConfidenceInput {
    let mut input = ConfidenceInput::new(FindingType::ObservedBreak);
    input.evidence = Some(EvidencePackage {
        is_complete: true,
        ..Default::default()
    });
    input
}

#[test]
fn t2_pol_01_no_path_yields_builtin() {
    let cache = PolicyCache::new();
    let policy = cache.load(None, None).unwrap();
    assert!(Arc::ptr_eq(&policy, &ConfidencePolicy::builtin()));
    assert_eq!(policy.version(), "1.0.0");
}

#[test]
fn t2_pol_02_same_key_returns_same_instance() {
    let dir = tempfile::tempdir().unwrap();
    write_policy(dir.path(), "policy.json", &policy_json("2.0.0"));

    let cache = PolicyCache::new();
    let a = cache.load(Some(Path::new("policy.json")), Some(dir.path())).unwrap();
    let b = cache.load(Some(Path::new("policy.json")), Some(dir.path())).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(cache.contains(Path::new("policy.json"), Some(dir.path())));
    assert_eq!(a.source(), &PolicySource::File(dir.path().join("policy.json")));

    // The file changing on disk does not change the cached policy.
    write_policy(dir.path(), "policy.json", &policy_json("3.0.0"));
    let c = cache.load(Some(Path::new("policy.json")), Some(dir.path())).unwrap();
    assert_eq!(c.version(), "2.0.0");

    cache.clear();
    let d = cache.load(Some(Path::new("policy.json")), Some(dir.path())).unwrap();
    assert_eq!(d.version(), "3.0.0");
}

#[test]
fn t2_pol_03_truth_locks_cannot_be_overridden() {
    let dir = tempfile::tempdir().unwrap();
    write_policy(dir.path(), "policy.json", &policy_json("2.0.0"));
    let policy = PolicyCache::new()
        .load(Some(&dir.path().join("policy.json")), None)
        .unwrap();
    assert_eq!(policy.truth_locks(), &TruthLocks::default());
    assert_eq!(policy.thresholds().high, 0.85);
}

#[test]
fn t2_pol_04_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = PolicyCache::new()
        .load(Some(Path::new("absent.json")), Some(dir.path()))
        .unwrap_err();
    assert!(matches!(err, PolicyError::NotFound { .. }));
    assert_eq!(err.error_code(), "POLICY_NOT_FOUND");
}

#[test]
fn t2_pol_05_invalid_file_is_never_replaced_by_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let mut bad = policy_json("2.0.0");
    bad["weights"]["promiseStrength"] = json!(0.9);
    write_policy(dir.path(), "bad.json", &bad);
    std::fs::write(dir.path().join("broken.json"), "{\"version\":").unwrap();

    let cache = PolicyCache::new();
    let err = cache.load(Some(Path::new("bad.json")), Some(dir.path())).unwrap_err();
    assert_eq!(err.error_code(), "POLICY_INVALID");
    assert!(!cache.contains(Path::new("bad.json"), Some(dir.path())), "failures are not cached");

    let err = cache.load(Some(Path::new("broken.json")), Some(dir.path())).unwrap_err();
    assert_eq!(err.error_code(), "POLICY_PARSE_ERROR");
}

#[test]
fn t2_pol_06_engine_surfaces_policy_errors() {
    let dir = tempfile::tempdir().unwrap();
    let engine = ConfidenceEngine::default();
    let mut input = enriched_input();
    input.options.policy_path = Some("nope.json".into());
    input.options.project_dir = Some(dir.path().to_path_buf());
    let err = engine.compute_confidence(&input).unwrap_err();
    assert!(matches!(err, ConfidenceError::Policy(PolicyError::NotFound { .. })));

    // The legacy path never touches the policy.
    let mut legacy = ConfidenceInput::new(FindingType::ObservedBreak);
    legacy.options = input.options.clone();
    assert!(engine.compute_confidence(&legacy).is_ok());
}

#[test]
fn t2_pol_07_applied_policy_reports_version_and_source() {
    let dir = tempfile::tempdir().unwrap();
    write_policy(dir.path(), "team.json", &policy_json("2.4.1"));

    let engine = ConfidenceEngine::with_config(ConfidenceConfig {
        policy_path: Some("team.json".into()),
        project_dir: Some(dir.path().display().to_string()),
        ..Default::default()
    });
    let out = engine.compute_confidence(&enriched_input()).unwrap();
    let applied = out.applied_policy.unwrap();
    assert_eq!(applied.version, "2.4.1");
    assert_eq!(applied.source, dir.path().join("team.json").display().to_string());

    let builtin = ConfidenceEngine::default().compute_confidence(&enriched_input()).unwrap();
    assert_eq!(builtin.applied_policy.unwrap().source, "builtin");
}
