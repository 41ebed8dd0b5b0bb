//! Policy file parsing and schema validation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::types::{ConfidencePolicy, PolicySource, PolicyWeights, Thresholds, TruthLocks};
use crate::errors::PolicyError;

/// Weights must sum to 1.0 within this tolerance.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyFile {
    version: String,
    base_scores: BTreeMap<String, f64>,
    thresholds: Thresholds,
    weights: PolicyWeights,
}

/// Resolve a policy path against the project directory when relative.
pub fn resolve_path(policy_path: &Path, project_dir: Option<&Path>) -> PathBuf {
    match project_dir {
        Some(dir) if policy_path.is_relative() => dir.join(policy_path),
        _ => policy_path.to_path_buf(),
    }
}

/// Read, validate, and build a policy from a file. Truth locks in the file
/// are validated for presence and then discarded in favour of the defaults.
pub fn load_from_file(path: &Path) -> Result<ConfidencePolicy, PolicyError> {
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(PolicyError::NotFound { path: path_str });
    }
    let raw = std::fs::read_to_string(path).map_err(|e| PolicyError::Read {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;
    let policy = parse_policy(&raw, PolicySource::File(path.to_path_buf()))?;
    info!(path = %path_str, version = policy.version(), "Loaded confidence policy");
    Ok(policy)
}

/// Parse and validate policy JSON.
pub fn parse_policy(raw: &str, source: PolicySource) -> Result<ConfidencePolicy, PolicyError> {
    let path = source.to_string();
    let value: Value = serde_json::from_str(raw).map_err(|e| PolicyError::Parse {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let invalid = |reason: String| PolicyError::Invalid {
        path: path.clone(),
        reason,
    };

    validate_shape(&value).map_err(invalid)?;

    let file: PolicyFile = serde_json::from_value(value.clone()).map_err(|e| invalid(e.to_string()))?;
    validate_values(&file).map_err(invalid)?;

    if let Some(locks) = value.get("truthLocks") {
        if locks != &default_locks_json() {
            warn!(path = %path, "Policy file truthLocks differ from defaults; overridden with defaults");
        }
    }

    Ok(ConfidencePolicy::from_validated(
        file.version,
        file.base_scores,
        file.thresholds,
        file.weights,
        source,
    ))
}

fn validate_shape(value: &Value) -> Result<(), String> {
    let root = value.as_object().ok_or("policy root must be a JSON object")?;

    match root.get("version") {
        Some(Value::String(v)) if !v.trim().is_empty() => {}
        Some(Value::String(_)) => return Err("'version' must not be empty".into()),
        Some(_) => return Err("'version' must be a string".into()),
        None => return Err("missing required field 'version'".into()),
    }

    for field in ["baseScores", "thresholds", "weights", "truthLocks"] {
        match root.get(field) {
            Some(Value::Object(_)) => {}
            Some(_) => return Err(format!("'{field}' must be an object")),
            None => return Err(format!("missing required field '{field}'")),
        }
    }

    if let Some(Value::Object(locks)) = root.get("truthLocks") {
        for key in TruthLocks::REQUIRED_KEYS {
            if !locks.contains_key(key) {
                return Err(format!("'truthLocks' is missing required key '{key}'"));
            }
        }
    }

    Ok(())
}

fn validate_values(file: &PolicyFile) -> Result<(), String> {
    for (name, t) in [
        ("high", file.thresholds.high),
        ("medium", file.thresholds.medium),
        ("low", file.thresholds.low),
    ] {
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(format!("thresholds.{name} must be within [0, 1], got {t}"));
        }
    }
    if file.thresholds.low > file.thresholds.medium || file.thresholds.medium > file.thresholds.high {
        return Err("thresholds must satisfy low <= medium <= high".into());
    }

    for (name, w) in file.weights.as_array() {
        if !w.is_finite() || w < 0.0 {
            return Err(format!("weights.{name} must be a non-negative number, got {w}"));
        }
    }
    let sum = file.weights.sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(format!("weights must sum to 1.0 (±{WEIGHT_SUM_TOLERANCE}), got {sum:.4}"));
    }

    for (key, score) in &file.base_scores {
        if !score.is_finite() || !(0.0..=1.0).contains(score) {
            return Err(format!("baseScores.{key} must be within [0, 1], got {score}"));
        }
    }

    Ok(())
}

fn default_locks_json() -> Value {
    serde_json::to_value(TruthLocks::default()).unwrap_or(Value::Null)
}
