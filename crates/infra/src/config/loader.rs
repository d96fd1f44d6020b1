//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `RISKVIEW_TENANT` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. Built-in defaults when no config file exists
//!
//! ## Environment Variables
//! - `RISKVIEW_TENANT`: C4C tenant name (required for env loading)
//! - `RISKVIEW_DOMAIN_SUFFIX`: Tenant host suffix
//! - `RISKVIEW_BASE_PATH`: OData service root path
//! - `RISKVIEW_BASE_URL`: Full service root, replaces the three above
//! - `RISKVIEW_REQUEST_TIMEOUT_MS`: Request timeout in milliseconds
//! - `RISKVIEW_PROBE_TIMEOUT_MS`: Connection test timeout in milliseconds
//! - `RISKVIEW_ROLE_CODES`: Comma-separated party role codes
//!
//! Credentials are never read from configuration; see the `riskview` binary.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./riskview.json` or `./riskview.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use riskview_domain::{C4cSettings, Result, RiskViewConfig, RiskViewError, RoleSettings};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables, then from a config
/// file. When neither is available the built-in defaults are used.
///
/// # Errors
/// Returns `RiskViewError::Config` if a source exists but is invalid.
pub fn load() -> Result<RiskViewConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            return Ok(config);
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
        }
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration file found, using defaults");
            Ok(RiskViewConfig::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `RISKVIEW_TENANT` must be present; every other variable falls back to its
/// default.
///
/// # Errors
/// Returns `RiskViewError::Config` if the tenant is missing or a numeric
/// variable has an invalid value.
pub fn load_from_env() -> Result<RiskViewConfig> {
    let defaults = C4cSettings::default();

    let tenant = env_var("RISKVIEW_TENANT")?;
    let domain_suffix = optional_env("RISKVIEW_DOMAIN_SUFFIX").unwrap_or(defaults.domain_suffix);
    let base_path = optional_env("RISKVIEW_BASE_PATH").unwrap_or(defaults.base_path);
    let base_url_override = optional_env("RISKVIEW_BASE_URL");

    let request_timeout_ms =
        env_millis("RISKVIEW_REQUEST_TIMEOUT_MS", defaults.request_timeout_ms)?;
    let probe_timeout_ms = env_millis("RISKVIEW_PROBE_TIMEOUT_MS", defaults.probe_timeout_ms)?;

    let roles = match optional_env("RISKVIEW_ROLE_CODES") {
        Some(codes) => RoleSettings { codes: parse_role_codes(&codes) },
        None => RoleSettings::default(),
    };

    Ok(RiskViewConfig {
        c4c: C4cSettings {
            tenant,
            domain_suffix,
            base_path,
            request_timeout_ms,
            probe_timeout_ms,
            base_url_override,
        },
        roles,
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `RiskViewError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<RiskViewConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(RiskViewError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            RiskViewError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| RiskViewError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<RiskViewConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| RiskViewError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| RiskViewError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(RiskViewError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
        candidates.extend(candidate_files(&cwd.join("..")));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> [PathBuf; 4] {
    [
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("riskview.json"),
        dir.join("riskview.toml"),
    ]
}

/// Get required environment variable
///
/// # Errors
/// Returns `RiskViewError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    optional_env(key).ok_or_else(|| {
        RiskViewError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Trimmed, non-empty value of an environment variable.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_millis(key: &str, default: u64) -> Result<u64> {
    match optional_env(key) {
        Some(value) => value
            .parse::<u64>()
            .map_err(|e| RiskViewError::Config(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}

/// Split a comma-separated role list, dropping blanks.
fn parse_role_codes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_KEYS: [&str; 7] = [
        "RISKVIEW_TENANT",
        "RISKVIEW_DOMAIN_SUFFIX",
        "RISKVIEW_BASE_PATH",
        "RISKVIEW_BASE_URL",
        "RISKVIEW_REQUEST_TIMEOUT_MS",
        "RISKVIEW_PROBE_TIMEOUT_MS",
        "RISKVIEW_ROLE_CODES",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_with_overrides() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("RISKVIEW_TENANT", "my000001");
        std::env::set_var("RISKVIEW_REQUEST_TIMEOUT_MS", "15000");
        std::env::set_var("RISKVIEW_ROLE_CODES", "Z018, Z050,,");

        let result = load_from_env();
        assert!(result.is_ok(), "Should load config from env vars, error: {:?}", result.err());

        let config = result.unwrap();
        assert_eq!(config.c4c.tenant, "my000001");
        assert_eq!(config.c4c.request_timeout_ms, 15_000);
        assert_eq!(config.c4c.probe_timeout_ms, 10_000);
        assert_eq!(config.c4c.domain_suffix, ".crm.ondemand.com");
        assert_eq!(config.roles.codes, vec!["Z018", "Z050"]);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_tenant() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let result = load_from_env();
        assert!(matches!(result, Err(RiskViewError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("RISKVIEW_TENANT", "my000001");
        std::env::set_var("RISKVIEW_PROBE_TIMEOUT_MS", "soon");

        let result = load_from_env();
        assert!(matches!(result, Err(RiskViewError::Config(msg)) if msg.contains("RISKVIEW_PROBE_TIMEOUT_MS")));

        clear_env();
    }

    #[test]
    fn test_load_from_file_json() {
        let path = temp_config(
            r#"{ "c4c": { "tenant": "my000002", "request_timeout_ms": 5000 } }"#,
            "json",
        );

        let config = load_from_file(Some(path.clone())).expect("Should load config from JSON file");
        assert_eq!(config.c4c.tenant, "my000002");
        assert_eq!(config.c4c.request_timeout_ms, 5_000);
        assert_eq!(config.roles, RoleSettings::default());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_toml() {
        let path = temp_config(
            r#"
[c4c]
tenant = "my000003"
base_url_override = "http://localhost:8080/odata/"

[roles]
codes = ["1001"]
"#,
            "toml",
        );

        let config = load_from_file(Some(path.clone())).expect("Should load config from TOML file");
        assert_eq!(config.c4c.tenant, "my000003");
        assert_eq!(config.c4c.base_url_override.as_deref(), Some("http://localhost:8080/odata/"));
        assert_eq!(config.roles.codes, vec!["1001"]);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(RiskViewError::Config(_))), "Should be a Config error");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = temp_config(r#"{ "this is": "not valid json" "#, "json");

        let result = load_from_file(Some(path.clone()));
        assert!(result.is_err(), "Should fail with invalid JSON");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("tenant: x", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }

    #[test]
    fn test_parse_role_codes() {
        assert_eq!(parse_role_codes(" 1001 ,Z018"), vec!["1001", "Z018"]);
        assert!(parse_role_codes(" , ").is_empty());
    }
}
