//! Port interfaces for the C4C OData backend

use async_trait::async_trait;
use riskview_domain::{Credentials, ODataResponse, QueryOptions, Result, RiskViewError};
use serde::de::DeserializeOwned;

/// Read-only access to C4C OData collections.
///
/// Implementations perform a single authenticated GET per call, bounded by
/// their own timeout, and normalize every failure into [`RiskViewError`].
#[async_trait]
pub trait ODataGateway: Send + Sync {
    /// GET `{collection}{query}` and return the decoded JSON body.
    async fn fetch_json(
        &self,
        credentials: &Credentials,
        collection: &str,
        options: &QueryOptions,
    ) -> Result<serde_json::Value>;

    /// Probe the service metadata endpoint. Never errors.
    async fn test_connection(&self, credentials: &Credentials) -> bool;
}

/// Fetch a collection and decode its rows into `T`.
pub async fn fetch_collection<T: DeserializeOwned>(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    collection: &str,
    options: &QueryOptions,
) -> Result<Vec<T>> {
    let body = gateway.fetch_json(credentials, collection, options).await?;
    let envelope: ODataResponse<T> = serde_json::from_value(body).map_err(|e| {
        RiskViewError::Decode(format!("unexpected {collection} payload: {e}"))
    })?;
    Ok(envelope.into_results())
}
