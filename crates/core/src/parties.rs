//! Party resolution for a service request

use std::collections::HashSet;

use riskview_domain::constants::collections::SERVICE_REQUEST_PARTY;
use riskview_domain::{
    Credentials, FilterCondition, LogicalOperator, Party, QueryOptions, Result, RiskViewError,
};
use tracing::debug;

use crate::ports::{fetch_collection, ODataGateway};
use crate::query::{build_filter, build_multi_value_filter, build_raw_filter, build_select};

const PARTY_FIELDS: [&str; 7] =
    ["PartyID", "PartyUUID", "PartyName", "RoleCode", "RoleCodeText", "Email", "Phone"];

/// Parties of `parent_object_id` holding any of `role_codes`.
///
/// Parties are unique by `PartyID`: the first occurrence wins and backend
/// order is preserved. Rows without a `PartyID` are dropped. An empty role
/// list does not restrict by role.
pub async fn get_risk_parties<S: AsRef<str>>(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    parent_object_id: &str,
    role_codes: &[S],
) -> Result<Vec<Party>> {
    let parent_clause = build_filter(
        &[FilterCondition::eq("ParentObjectID", parent_object_id)],
        LogicalOperator::And,
    );
    let role_clause = build_multi_value_filter("RoleCode", role_codes);

    let options = QueryOptions::new()
        .filter(build_raw_filter(&[parent_clause, role_clause], LogicalOperator::And))
        .select(build_select(&PARTY_FIELDS));

    let rows = fetch_collection::<Party>(gateway, credentials, SERVICE_REQUEST_PARTY, &options)
        .await
        .map_err(|err| RiskViewError::lookup("Could not fetch the parties", err))?;

    let fetched = rows.len();
    let parties = dedup_by_party_id(rows);
    debug!(parent_object_id, fetched, unique = parties.len(), "parties fetched");

    Ok(parties)
}

fn dedup_by_party_id(rows: Vec<Party>) -> Vec<Party> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|party| !party.party_id.is_empty() && seen.insert(party.party_id.clone()))
        .collect()
}
