//! Configuration loading errors.

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not readable: {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    TomlParse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            Self::TomlParse { .. } => error_code::CONFIG_PARSE_ERROR,
            Self::Invalid(_) => error_code::CONFIG_ERROR,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
