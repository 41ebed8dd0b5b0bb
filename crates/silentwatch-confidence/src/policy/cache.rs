//! Per-`(projectDir, policyPath)` policy cache.
//!
//! Constructor-injected rather than ambient: tests build their own cache
//! instead of clearing a global one. Each key is loaded at most once, and
//! every later lookup returns the same `Arc`. Failed loads are not cached.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use super::loader::{load_from_file, resolve_path};
use super::types::ConfidencePolicy;
use crate::errors::PolicyError;

/// The literal key pair, before any path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyKey {
    pub project_dir: Option<PathBuf>,
    pub policy_path: PathBuf,
}

pub struct PolicyCache {
    entries: Cache<PolicyKey, Arc<ConfidencePolicy>>,
}

impl PolicyCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().name("confidence-policy").build(),
        }
    }

    /// Load a policy. No path → the built-in default policy.
    pub fn load(
        &self,
        policy_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Arc<ConfidencePolicy>, PolicyError> {
        let Some(policy_path) = policy_path else {
            return Ok(ConfidencePolicy::builtin());
        };

        let key = PolicyKey {
            project_dir: project_dir.map(Path::to_path_buf),
            policy_path: policy_path.to_path_buf(),
        };

        if let Some(hit) = self.entries.get(&key) {
            debug!(path = %policy_path.display(), "Policy cache hit");
            return Ok(hit);
        }

        let resolved = resolve_path(policy_path, project_dir);
        self.entries
            .try_get_with(key, || load_from_file(&resolved).map(Arc::new))
            .map_err(|e| PolicyError::clone(&e))
    }

    pub fn contains(&self, policy_path: &Path, project_dir: Option<&Path>) -> bool {
        self.entries.contains_key(&PolicyKey {
            project_dir: project_dir.map(Path::to_path_buf),
            policy_path: policy_path.to_path_buf(),
        })
    }

    /// Drop every cached policy. Intended for tests; production code keeps
    /// policies for the process lifetime.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for PolicyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PolicyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyCache")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
