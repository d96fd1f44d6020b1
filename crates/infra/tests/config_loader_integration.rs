//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use riskview_infra::config;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[c4c]
tenant = "my123456"
domain_suffix = ".crm.ondemand.com"
request_timeout_ms = 20000
probe_timeout_ms = 4000

[roles]
codes = ["Z018", "Z050"]
"#;

    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("toml");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let config = config::load_from_file(Some(path.clone())).expect("Failed to load TOML config");

    assert_eq!(config.c4c.tenant, "my123456");
    assert_eq!(config.c4c.request_timeout().as_millis(), 20_000);
    assert_eq!(config.c4c.probe_timeout().as_millis(), 4_000);
    assert_eq!(config.c4c.base_path, "/sap/c4c/odata/v1/c4codataapi/");
    assert_eq!(config.roles.codes, vec!["Z018", "Z050"]);

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_with_unknown_extension_fails() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(b"c4c: {}").expect("Failed to write to temp file");

    let path = temp_file.path().with_extension("yaml");
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");

    let result = config::load_from_file(Some(path.clone()));
    assert!(result.is_err(), "YAML is not a supported config format");

    std::fs::remove_file(path).ok();
}
