//! Outcome of a single-record lookup

use riskview_domain::{Result, RiskViewError};

/// Three-way result of a lookup, kept apart until the call site decides
/// whether a failure propagates, degrades or is swallowed.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
    Failed(RiskViewError),
}

impl<T> Lookup<T> {
    /// Propagate failures, wrapped with `context`.
    pub fn into_result(self, context: impl Into<String>) -> Result<Option<T>> {
        match self {
            Self::Found(value) => Ok(Some(value)),
            Self::NotFound => Ok(None),
            Self::Failed(err) => Err(RiskViewError::lookup(context, err)),
        }
    }
}

impl<T> From<Result<Option<T>>> for Lookup<T> {
    fn from(result: Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Self::Found(value),
            Ok(None) => Self::NotFound,
            Err(err) => Self::Failed(err),
        }
    }
}
