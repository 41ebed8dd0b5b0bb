//! Error types shared across the workspace.

pub mod config_error;
pub mod error_code;

pub use config_error::{ConfigError, ConfigResult};
pub use error_code::ErrorCode;
