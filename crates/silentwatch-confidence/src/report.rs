//! Confidence report artifact: per-finding audit entries plus summary counts.
//!
//! Entries are keyed by a stable finding identity and kept in a `BTreeMap`,
//! so the serialized artifact is byte-identical for identical inputs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use silentwatch_core::types::{ConfidenceLevel, ExpectationKind, FindingType};
use silentwatch_core::{Confidence, FindingIdentity, TruthStatus};
use tracing::info;

use crate::api::{ConfidenceInput, ConfidenceOutput};
use crate::errors::ReportError;
use crate::invariants::InvariantCode;
use crate::reason_codes::ReasonCode;

/// Fields that identify a finding. Nothing observed or scored goes in here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingKey<'a> {
    pub finding_type: FindingType,
    pub promise_id: Option<&'a str>,
    pub expectation_kind: Option<ExpectationKind>,
    pub target: Option<&'a str>,
    pub source_ref: Option<&'a str>,
}

impl<'a> FindingKey<'a> {
    pub fn from_input(input: &'a ConfidenceInput) -> Self {
        let exp = input.expectation.as_ref();
        Self {
            finding_type: input.finding_type,
            promise_id: exp.and_then(|e| e.promise_id.as_deref()),
            expectation_kind: exp.map(|e| e.kind),
            target: exp.and_then(|e| e.target.as_deref()),
            source_ref: exp.and_then(|e| e.source_ref.as_deref()),
        }
    }

    pub fn identity(&self) -> Result<FindingIdentity, serde_json::Error> {
        FindingIdentity::of(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub finding_type: FindingType,
    pub score: u8,
    pub level: ConfidenceLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truth_status: Option<TruthStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_before: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_after: Option<Confidence>,
    pub applied_invariants: Vec<InvariantCode>,
    pub violation_count: usize,
    pub reason_codes: Vec<ReasonCode>,
    pub explain: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_findings: usize,
    pub by_level: BTreeMap<ConfidenceLevel, usize>,
    pub by_truth_status: BTreeMap<TruthStatus, usize>,
    pub invariant_violations: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ConfidenceReport {
    entries: BTreeMap<FindingIdentity, ReportEntry>,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    summary: ReportSummary,
    findings: &'a BTreeMap<FindingIdentity, ReportEntry>,
}

impl ConfidenceReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scored finding. A later result for the same identity
    /// replaces the earlier one.
    pub fn record(&mut self, input: &ConfidenceInput, output: &ConfidenceOutput) -> Result<FindingIdentity, ReportError> {
        let id = FindingKey::from_input(input).identity()?;
        let entry = ReportEntry {
            finding_type: input.finding_type,
            score: output.score,
            level: output.level,
            truth_status: output.truth_status,
            confidence_before: output.confidence_before,
            confidence_after: output.confidence_after,
            applied_invariants: output.applied_invariants.clone(),
            violation_count: output.invariant_violations.len(),
            reason_codes: output.reason_codes.clone(),
            explain: output.explain.clone(),
        };
        self.entries.insert(id.clone(), entry);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &FindingIdentity) -> Option<&ReportEntry> {
        self.entries.get(id)
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary {
            total_findings: self.entries.len(),
            ..Default::default()
        };
        for entry in self.entries.values() {
            *summary.by_level.entry(entry.level).or_default() += 1;
            if let Some(status) = entry.truth_status {
                *summary.by_truth_status.entry(status).or_default() += 1;
            }
            summary.invariant_violations += entry.violation_count;
        }
        summary
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        let doc = ReportDocument {
            summary: self.summary(),
            findings: &self.entries,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ReportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), findings = self.entries.len(), "Confidence report written");
        Ok(())
    }
}
