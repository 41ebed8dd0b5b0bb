//! Versioned confidence policy: built-in defaults, file loading, caching.

pub mod cache;
pub mod loader;
pub mod types;

pub use cache::{PolicyCache, PolicyKey};
pub use loader::{load_from_file, parse_policy, resolve_path};
pub use types::{AppliedPolicy, ConfidencePolicy, PolicySource, PolicyWeights, Thresholds, TruthLocks};
