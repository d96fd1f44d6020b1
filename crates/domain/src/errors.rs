//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for RiskView
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RiskViewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-success HTTP status. `message` is the backend-provided text when
    /// the error envelope could be parsed, `HTTP {status}: {reason}` otherwise.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A load-bearing lookup failed; `context` names the operation and the
    /// identifiers involved.
    #[error("{context}: {source}")]
    Lookup { context: String, source: Box<RiskViewError> },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RiskViewError {
    /// Wrap an error with the context of the lookup that produced it.
    pub fn lookup(context: impl Into<String>, source: RiskViewError) -> Self {
        Self::Lookup { context: context.into(), source: Box::new(source) }
    }

    /// The innermost error, skipping any `Lookup` wrappers.
    pub fn root_cause(&self) -> &RiskViewError {
        match self {
            Self::Lookup { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// True when the underlying failure was a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self.root_cause(), Self::Timeout(_))
    }

    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::Auth(_) => "auth",
            Self::Http { .. } => "http",
            Self::Decode(_) => "decode",
            Self::Lookup { .. } => "lookup",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for RiskView operations
pub type Result<T> = std::result::Result<T, RiskViewError>;
