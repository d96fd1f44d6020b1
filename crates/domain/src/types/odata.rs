//! OData v2 response envelopes

use serde::{Deserialize, Serialize};

/// Collection response: `{ "d": { "results": [...], "__count": "..", "__next": ".." } }`
///
/// A missing `d` or `results` decodes as an empty collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ODataResponse<T> {
    #[serde(default = "ODataResults::default")]
    pub d: ODataResults<T>,
}

/// Body of a collection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ODataResults<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(rename = "__count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(rename = "__next", default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> Default for ODataResults<T> {
    fn default() -> Self {
        Self { results: Vec::new(), count: None, next: None }
    }
}

impl<T> ODataResponse<T> {
    /// Consume the envelope, keeping only the rows.
    pub fn into_results(self) -> Vec<T> {
        self.d.results
    }

    /// Consume the envelope, keeping only the first row.
    pub fn into_first(self) -> Option<T> {
        self.d.results.into_iter().next()
    }

    /// `__count`, when the query asked for it and the server returned a number.
    pub fn total_count(&self) -> Option<u64> {
        self.d.count.as_deref().and_then(|count| count.parse().ok())
    }
}

/// Single-entity response: `{ "d": { ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ODataSingleResponse<T> {
    pub d: T,
}

/// Error response: `{ "error": { "code": "..", "message": { "lang": "..", "value": ".." } } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ODataErrorEnvelope {
    pub error: ODataErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ODataErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<ODataErrorMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ODataErrorMessage {
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl ODataErrorEnvelope {
    /// The human-readable message, if the backend supplied a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.error
            .message
            .as_ref()
            .and_then(|message| message.value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        #[serde(rename = "ID")]
        id: String,
    }

    #[test]
    fn decodes_collection_with_count_and_next() {
        let response: ODataResponse<Row> = serde_json::from_value(json!({
            "d": {
                "results": [{ "ID": "1", "Extra": true }, { "ID": "2" }],
                "__count": "42",
                "__next": "https://host/next"
            }
        }))
        .unwrap();

        assert_eq!(response.total_count(), Some(42));
        assert_eq!(response.d.next.as_deref(), Some("https://host/next"));
        assert_eq!(response.into_first(), Some(Row { id: "1".into() }));
    }

    #[test]
    fn missing_envelope_parts_decode_as_empty() {
        let no_d: ODataResponse<Row> = serde_json::from_value(json!({})).unwrap();
        let no_results: ODataResponse<Row> = serde_json::from_value(json!({ "d": {} })).unwrap();

        assert!(no_d.into_results().is_empty());
        assert!(no_results.into_results().is_empty());
    }

    #[test]
    fn extracts_error_message_value() {
        let envelope: ODataErrorEnvelope = serde_json::from_value(json!({
            "error": { "code": "401", "message": { "lang": "en", "value": "Invalid credentials" } }
        }))
        .unwrap();

        assert_eq!(envelope.message(), Some("Invalid credentials"));
    }

    #[test]
    fn blank_error_message_is_treated_as_absent() {
        let envelope: ODataErrorEnvelope = serde_json::from_value(json!({
            "error": { "code": "500", "message": { "lang": "en", "value": "  " } }
        }))
        .unwrap();

        assert_eq!(envelope.message(), None);
    }
}
