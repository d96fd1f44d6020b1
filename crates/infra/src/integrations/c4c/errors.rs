//! C4C-specific error types and classification
//!
//! Non-success OData responses are classified by status code and carry the
//! backend's own message when the error envelope can be parsed.

use std::fmt;

use reqwest::StatusCode;
use riskview_domain::{ODataErrorEnvelope, RiskViewError};

/// C4C error category, used for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum C4cErrorCategory {
    /// Credentials rejected (401, 403)
    Authentication,

    /// Entity set or key does not exist (404)
    NotFound,

    /// Rate limit exceeded (429)
    RateLimited,

    /// Malformed query or data (other 4xx)
    Validation,

    /// Tenant is unavailable (5xx)
    ServerUnavailable,

    /// Unknown or unclassified status
    Unknown,
}

impl C4cErrorCategory {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => Self::Authentication,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            400..=499 => Self::Validation,
            500..=599 => Self::ServerUnavailable,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for C4cErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "Authentication Failed"),
            Self::NotFound => write!(f, "Not Found"),
            Self::RateLimited => write!(f, "Rate Limited"),
            Self::Validation => write!(f, "Validation Error"),
            Self::ServerUnavailable => write!(f, "Server Unavailable"),
            Self::Unknown => write!(f, "Unknown Error"),
        }
    }
}

/// Error returned by the C4C OData service for a non-success response.
#[derive(Debug, Clone)]
pub struct C4cError {
    category: C4cErrorCategory,
    status: StatusCode,
    message: String,
    code: Option<String>,
}

impl C4cError {
    /// Classify HTTP status code into error category
    pub fn from_status_code(status: StatusCode) -> Self {
        Self {
            category: C4cErrorCategory::from_status(status),
            status,
            message: format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ),
            code: None,
        }
    }

    /// Build from a non-success response, preferring the message of the OData
    /// error envelope `{"error":{"message":{"value":..}}}` when present.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let fallback = Self::from_status_code(status);

        match serde_json::from_str::<ODataErrorEnvelope>(body) {
            Ok(envelope) => {
                let message = envelope.message().map(str::to_string);
                Self {
                    message: message.unwrap_or(fallback.message),
                    code: envelope.error.code,
                    ..fallback
                }
            }
            Err(_) => fallback,
        }
    }

    pub fn category(&self) -> C4cErrorCategory {
        self.category
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Backend error code, e.g. `SY/530`.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Convert to domain error type
    pub fn into_domain_error(self) -> RiskViewError {
        match self.category {
            C4cErrorCategory::Authentication => RiskViewError::Auth(self.message),
            _ => RiskViewError::Http { status: self.status.as_u16(), message: self.message },
        }
    }
}

impl fmt::Display for C4cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        Ok(())
    }
}

impl std::error::Error for C4cError {}

impl From<C4cError> for RiskViewError {
    fn from(err: C4cError) -> Self {
        err.into_domain_error()
    }
}
