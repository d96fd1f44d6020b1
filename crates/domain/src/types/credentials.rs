//! Per-call C4C credentials.

use std::fmt;

use crate::errors::{Result, RiskViewError};

/// Tenant plus Basic-auth credentials for a single request.
///
/// All three values are trimmed on construction and must be non-empty, so a
/// `Credentials` value is always usable for a request. The password is never
/// included in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    tenant: String,
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(
        tenant: impl AsRef<str>,
        username: impl AsRef<str>,
        password: impl AsRef<str>,
    ) -> Result<Self> {
        let tenant = required("tenant", tenant.as_ref())?;
        let username = required("username", username.as_ref())?;
        let password = required("password", password.as_ref())?;

        if !tenant.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(RiskViewError::InvalidInput(format!(
                "tenant may only contain letters, digits and hyphens: {tenant}"
            )));
        }

        Ok(Self { tenant, username, password })
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RiskViewError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant", &self.tenant)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
