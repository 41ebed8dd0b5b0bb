//! T0-CFG-01 through T0-CFG-06: `silentwatch.toml` loading.

use silentwatch_core::errors::ConfigError;
use silentwatch_core::{ErrorCode, SilentwatchConfig};

#[test]
fn t0_cfg_01_empty_toml_gives_defaults() {
    let config = SilentwatchConfig::from_toml("").unwrap();
    assert_eq!(config, SilentwatchConfig::default());
    assert_eq!(config.confidence.effective_max_explain_items(), 8);
    assert_eq!(config.confidence.effective_report_path(), "confidence-report.json");
    assert_eq!(config.observability.effective_log_level(), "info");
    assert!(!config.observability.effective_json());
}

#[test]
fn t0_cfg_02_partial_sections_keep_other_defaults() {
    let config = SilentwatchConfig::from_toml(
        r#"
        [confidence]
        policy_path = "policies/strict.json"
        max_explain_items = 20

        [observability]
        json = true
        "#,
    )
    .unwrap();

    assert_eq!(config.confidence.policy_path.as_deref(), Some("policies/strict.json"));
    // Clamped to the report limit.
    assert_eq!(config.confidence.effective_max_explain_items(), 8);
    assert!(config.observability.effective_json());
    assert_eq!(config.observability.effective_log_level(), "info");
}

#[test]
fn t0_cfg_03_from_file_reads_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("silentwatch.toml");
    std::fs::write(&path, "[confidence]\nreport_path = \"out/report.json\"\n").unwrap();

    let config = SilentwatchConfig::from_file(&path).unwrap();
    assert_eq!(config.confidence.effective_report_path(), "out/report.json");
}

#[test]
fn t0_cfg_04_invalid_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("silentwatch.toml");

    std::fs::write(&path, "[confidence]\nmax_explain_items = 0\n").unwrap();
    let err = SilentwatchConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");

    std::fs::write(&path, "[confidence]\npolicy_path = \"  \"\n").unwrap();
    assert!(matches!(
        SilentwatchConfig::from_file(&path).unwrap_err(),
        ConfigError::Invalid(_)
    ));

    std::fs::write(&path, "[confidence\n").unwrap();
    let err = SilentwatchConfig::from_file(&path).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_PARSE_ERROR");
}

#[test]
fn t0_cfg_05_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SilentwatchConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.error_code(), "IO_ERROR");
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn t0_cfg_06_project_dir_lookup() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        SilentwatchConfig::from_project_dir(dir.path()).unwrap(),
        SilentwatchConfig::default()
    );

    std::fs::write(dir.path().join("silentwatch.toml"), "[observability]\nlog_level = \"debug\"\n").unwrap();
    let config = SilentwatchConfig::from_project_dir(dir.path()).unwrap();
    assert_eq!(config.observability.effective_log_level(), "debug");

    std::fs::write(dir.path().join("silentwatch.toml"), "[confidence]\nmax_explain_items = 0\n").unwrap();
    assert!(SilentwatchConfig::from_project_dir(dir.path()).is_err());
}
