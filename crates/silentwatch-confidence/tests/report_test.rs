//! T5-RPT-01 through T5-RPT-04: report artifact and parallel scoring.

use rayon::prelude::*;
use silentwatch_confidence::report::FindingKey;
use silentwatch_confidence::{ConfidenceEngine, ConfidenceInput, ConfidenceReport};
use silentwatch_core::types::{
    EvidencePackage, Expectation, ExpectationKind, ExpectationProof, FindingType, NetworkSensor, Sensors,
};

fn finding(i: usize) -> ConfidenceInput {
    let mut input = ConfidenceInput::new(FindingType::SCORED[i % FindingType::SCORED.len()]);
    input.expectation = Some(Expectation {
        promise_id: Some(format!("promise-{i}")),
        kind: ExpectationKind::NetworkAction,
        proof: Some(ExpectationProof::ProvenExpectation),
        ..Default::default()
    });
    input.sensors = Sensors {
        network: Some(NetworkSensor {
            total_requests: (i % 3) as u32,
            failed_requests: (i % 2) as u32,
            ..Default::default()
        }),
        ..Default::default()
    };
    if i % 2 == 0 {
        input.evidence = Some(EvidencePackage {
            before_url: Some("/a".into()),
            after_url: Some(format!("/b{}", i % 4)),
            is_complete: i % 4 == 0,
            ..Default::default()
        });
    }
    input
}

#[test]
fn t5_rpt_01_identity_ignores_observations() {
    let a = finding(3);
    let mut b = a.clone();
    b.sensors = Sensors::default();
    b.attempt_meta.repeated = true;
    assert_eq!(
        FindingKey::from_input(&a).identity().unwrap(),
        FindingKey::from_input(&b).identity().unwrap()
    );

    let mut c = a.clone();
    c.expectation.as_mut().unwrap().promise_id = Some("other".into());
    assert_ne!(
        FindingKey::from_input(&a).identity().unwrap(),
        FindingKey::from_input(&c).identity().unwrap()
    );
}

#[test]
fn t5_rpt_02_report_is_order_independent() {
    let engine = ConfidenceEngine::default();
    let inputs: Vec<ConfidenceInput> = (0..40).map(finding).collect();

    let mut forward = ConfidenceReport::new();
    for input in &inputs {
        forward.record(input, &engine.compute_confidence(input).unwrap()).unwrap();
    }
    let mut backward = ConfidenceReport::new();
    for input in inputs.iter().rev() {
        backward.record(input, &engine.compute_confidence(input).unwrap()).unwrap();
    }

    assert_eq!(forward.len(), 40);
    assert_eq!(forward.to_json().unwrap(), backward.to_json().unwrap());

    let summary = forward.summary();
    assert_eq!(summary.total_findings, 40);
    assert_eq!(summary.by_level.values().sum::<usize>(), 40);
    // Only the enriched half carries a truth status.
    assert_eq!(summary.by_truth_status.values().sum::<usize>(), 20);
}

#[test]
fn t5_rpt_03_write_to_produces_parseable_artifact() {
    let engine = ConfidenceEngine::default();
    let mut report = ConfidenceReport::new();
    let input = finding(0);
    let id = report.record(&input, &engine.compute_confidence(&input).unwrap()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("confidence-report.json");
    report.write_to(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["summary"]["totalFindings"], 1);
    assert!(parsed["findings"][id.as_str()]["score"].is_u64());
    assert!(id.as_str().starts_with("fnd_"));
}

#[test]
fn t5_rpt_04_parallel_scoring_matches_sequential() {
    let engine = ConfidenceEngine::default();
    let inputs: Vec<ConfidenceInput> = (0..500).map(finding).collect();

    let sequential: Vec<_> = inputs
        .iter()
        .map(|i| engine.compute_confidence(i).unwrap())
        .collect();
    let parallel: Vec<_> = inputs
        .par_iter()
        .map(|i| engine.compute_confidence(i).unwrap())
        .collect();
    assert_eq!(sequential, parallel);
}
