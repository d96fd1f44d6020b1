//! Document-flow records: opportunity → document reference → service request

use serde::{Deserialize, Serialize};

use crate::constants::ZIDE_PROCESSING_TYPE_CODE;
use crate::utils::serde::null_as_default;

/// Service request (ticket) as returned by the expanded document reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(rename = "ObjectID", default, deserialize_with = "null_as_default")]
    pub object_id: String,
    #[serde(rename = "ID", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "ProcessingTypeCode", default, deserialize_with = "null_as_default")]
    pub processing_type_code: String,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ServiceRequest {
    /// Only tickets of processing type `ZIDE` are the resolution target.
    pub fn is_zide(&self) -> bool {
        self.processing_type_code == ZIDE_PROCESSING_TYPE_CODE
    }
}

/// Row of `ServiceRequestBusinessTransactionDocumentReferenceCollection`.
///
/// The nested `ServiceRequest` is only present when the query expanded it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "TypeCode", default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,
    #[serde(rename = "ServiceRequest", default, skip_serializing_if = "Option::is_none")]
    pub service_request: Option<ServiceRequest>,
}

/// Row of `OpportunityCollection` restricted to the display fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityRecord {
    #[serde(rename = "ID", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "ObjectID", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

/// Displayable opportunity summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityInfo {
    pub id: String,
    pub name: String,
}

impl OpportunityInfo {
    /// Placeholder record used when the opportunity has no name or could not
    /// be looked up.
    pub fn placeholder(id: impl Into<String>) -> Self {
        let id = id.into();
        let name = format!("Oportunidad {id}");
        Self { id, name }
    }
}

impl From<OpportunityRecord> for OpportunityInfo {
    fn from(record: OpportunityRecord) -> Self {
        match record.name.filter(|name| !name.trim().is_empty()) {
            Some(name) => Self { id: record.id, name },
            None => Self::placeholder(record.id),
        }
    }
}
