//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    API_REQUEST_TIMEOUT_MS, CONNECTION_TEST_TIMEOUT_MS, DEFAULT_ROLE_CODES, DEFAULT_TENANT,
    ODATA_BASE_PATH, TENANT_DOMAIN_SUFFIX,
};

/// Application configuration
///
/// Credentials are supplied per call and are not part of the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskViewConfig {
    pub c4c: C4cSettings,
    pub roles: RoleSettings,
}

/// C4C endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct C4cSettings {
    pub tenant: String,
    pub domain_suffix: String,
    pub base_path: String,
    pub request_timeout_ms: u64,
    pub probe_timeout_ms: u64,
    /// Replaces `https://{tenant}{domain_suffix}{base_path}` entirely (proxies
    /// and test servers). Must end with `/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url_override: Option<String>,
}

/// Party role configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleSettings {
    pub codes: Vec<String>,
}

impl C4cSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

impl Default for C4cSettings {
    fn default() -> Self {
        Self {
            tenant: DEFAULT_TENANT.to_string(),
            domain_suffix: TENANT_DOMAIN_SUFFIX.to_string(),
            base_path: ODATA_BASE_PATH.to_string(),
            request_timeout_ms: API_REQUEST_TIMEOUT_MS,
            probe_timeout_ms: CONNECTION_TEST_TIMEOUT_MS,
            base_url_override: None,
        }
    }
}

impl Default for RoleSettings {
    fn default() -> Self {
        Self { codes: DEFAULT_ROLE_CODES.iter().map(|code| (*code).to_string()).collect() }
    }
}
