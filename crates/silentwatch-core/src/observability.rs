//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::constants::LOG_ENV_VAR;

/// Install the global fmt subscriber. `SILENTWATCH_LOG` overrides the
/// configured level. Returns false if a subscriber was already installed.
pub fn init(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level()));

    let installed = if config.effective_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_existing_subscriber() {
        let config = ObservabilityConfig {
            log_level: Some("debug".to_string()),
            json: Some(true),
        };
        init(&config);
        assert!(!init(&ObservabilityConfig::default()));
    }
}
