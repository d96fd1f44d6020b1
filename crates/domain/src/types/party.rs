//! Parties attached to a service request

use serde::{Deserialize, Serialize};

use crate::utils::serde::null_as_default;

/// Row of `ServiceRequestPartyCollection`.
///
/// `party_id` is the business identifier parties are deduplicated by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(rename = "PartyID", default, deserialize_with = "null_as_default")]
    pub party_id: String,
    #[serde(rename = "PartyUUID", default, skip_serializing_if = "Option::is_none")]
    pub party_uuid: Option<String>,
    #[serde(rename = "PartyName", default, skip_serializing_if = "Option::is_none")]
    pub party_name: Option<String>,
    #[serde(rename = "RoleCode", default, skip_serializing_if = "Option::is_none")]
    pub role_code: Option<String>,
    #[serde(rename = "RoleCodeText", default, skip_serializing_if = "Option::is_none")]
    pub role_code_text: Option<String>,
    #[serde(rename = "ParentObjectID", default, skip_serializing_if = "Option::is_none")]
    pub parent_object_id: Option<String>,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "Mobile", default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(rename = "FormattedName", default, skip_serializing_if = "Option::is_none")]
    pub formatted_name: Option<String>,
    #[serde(rename = "MainIndicator", default, skip_serializing_if = "Option::is_none")]
    pub main_indicator: Option<bool>,
}

impl Party {
    /// Best available display name: party name, formatted name, then the ID.
    pub fn display_name(&self) -> &str {
        self.party_name
            .as_deref()
            .or(self.formatted_name.as_deref())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.party_id)
    }
}
