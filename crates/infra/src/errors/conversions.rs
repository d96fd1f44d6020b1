//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use riskview_domain::RiskViewError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RiskViewError);

impl From<InfraError> for RiskViewError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RiskViewError> for InfraError {
    fn from(value: RiskViewError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRiskViewError {
    fn into_riskview(self) -> RiskViewError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RiskViewError */
/* -------------------------------------------------------------------------- */

impl IntoRiskViewError for HttpError {
    fn into_riskview(self) -> RiskViewError {
        if self.is_timeout() {
            return RiskViewError::Timeout("HTTP request timed out".into());
        }

        if self.is_builder() {
            return RiskViewError::Config(format!("invalid HTTP request: {self}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return RiskViewError::Network(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {}: {}", code, status.canonical_reason().unwrap_or("Unknown"));

            return match code {
                401 | 403 => RiskViewError::Auth(message),
                _ => RiskViewError::Http { status: code, message },
            };
        }

        if self.is_body() || self.is_decode() {
            return RiskViewError::Network(format!("failed to read HTTP response body: {self}"));
        }

        RiskViewError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_riskview())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
