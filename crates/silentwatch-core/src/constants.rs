//! Workspace-wide constants.

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "SILENTWATCH_LOG";

/// Default config file name, looked up in the project directory.
pub const DEFAULT_CONFIG_FILE: &str = "silentwatch.toml";

/// Maximum number of entries in any `explain` list handed to report writers.
pub const MAX_EXPLAIN_ITEMS: usize = 8;

/// Process exit code for ordinary input/validation errors.
pub const EXIT_VALIDATION_ERROR: i32 = 65;

/// Process exit code for a run whose execution and judgments disagree.
/// Distinct from [`EXIT_VALIDATION_ERROR`]: the run is untrustworthy, not just unsuccessful.
pub const EXIT_UNTRUSTWORTHY_RUN: i32 = 70;
