//! In-memory `ODataGateway` for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use riskview_domain::{Credentials, QueryOptions, Result, RiskViewError};
use serde_json::{json, Value};

use crate::ports::ODataGateway;

/// Canned responses keyed by collection name. Unknown collections answer with
/// an empty result set. Every request is recorded for assertions.
#[derive(Default)]
pub struct MockGateway {
    responses: HashMap<String, Result<Value>>,
    connected: bool,
    calls: Mutex<Vec<(String, QueryOptions)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, collection: &str, rows: Value) -> Self {
        self.responses.insert(collection.to_string(), Ok(json!({ "d": { "results": rows } })));
        self
    }

    pub fn with_body(mut self, collection: &str, body: Value) -> Self {
        self.responses.insert(collection.to_string(), Ok(body));
        self
    }

    pub fn with_error(mut self, collection: &str, err: RiskViewError) -> Self {
        self.responses.insert(collection.to_string(), Err(err));
        self
    }

    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn calls(&self) -> Vec<(String, QueryOptions)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn calls_to(&self, collection: &str) -> Vec<QueryOptions> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| name == collection)
            .map(|(_, options)| options)
            .collect()
    }
}

#[async_trait]
impl ODataGateway for MockGateway {
    async fn fetch_json(
        &self,
        _credentials: &Credentials,
        collection: &str,
        options: &QueryOptions,
    ) -> Result<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((collection.to_string(), options.clone()));
        }

        match self.responses.get(collection) {
            Some(response) => response.clone(),
            None => Ok(json!({ "d": { "results": [] } })),
        }
    }

    async fn test_connection(&self, _credentials: &Credentials) -> bool {
        self.connected
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("my362429", "analyst", "secret").unwrap()
}
