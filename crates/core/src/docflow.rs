//! Document-flow resolution: opportunity → document reference → ZIDE ticket

use riskview_domain::constants::collections::{OPPORTUNITY, SERVICE_REQUEST_DOC_REFERENCE};
use riskview_domain::constants::OPPORTUNITY_DOCUMENT_TYPE_CODE;
use riskview_domain::{
    Credentials, DocumentReference, ExpandRelation, FilterCondition, LogicalOperator,
    OpportunityInfo, OpportunityRecord, QueryOptions, Result, ServiceRequest,
};
use tracing::{debug, info, warn};

use crate::lookup::Lookup;
use crate::ports::{fetch_collection, ODataGateway};
use crate::query::{build_expand, build_filter, build_select};

const SERVICE_REQUEST_FIELDS: [&str; 4] = ["ObjectID", "ID", "ProcessingTypeCode", "Name"];
const OPPORTUNITY_FIELDS: [&str; 3] = ["ID", "Name", "ObjectID"];

/// Find the ZIDE service request linked to an opportunity.
///
/// Returns `Ok(None)` when the opportunity has no document references or none
/// of the linked tickets is of processing type `ZIDE`. When several qualify,
/// the first in backend order wins.
pub async fn find_zide_by_opportunity(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    opportunity_id: &str,
) -> Result<Option<ServiceRequest>> {
    let context =
        format!("Could not look up the service request for opportunity {opportunity_id}");
    resolve_zide(gateway, credentials, opportunity_id).await.into_result(context)
}

/// Whether the opportunity has a linked ZIDE ticket. Lookup failures count as
/// "no ticket".
pub async fn has_zide_service_request(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    opportunity_id: &str,
) -> bool {
    match resolve_zide(gateway, credentials, opportunity_id).await {
        Lookup::Found(_) => true,
        Lookup::NotFound => false,
        Lookup::Failed(err) => {
            warn!(opportunity_id, error = %err, "ZIDE check failed; treating as absent");
            false
        }
    }
}

/// Display name of an opportunity.
///
/// `None` only when the backend answered with zero rows. Unreachable backends
/// yield the `Oportunidad {id}` placeholder.
pub async fn get_opportunity_info(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    opportunity_id: &str,
) -> Option<OpportunityInfo> {
    let options = QueryOptions::new()
        .filter(build_filter(&[FilterCondition::eq("ID", opportunity_id)], LogicalOperator::And))
        .select(build_select(&OPPORTUNITY_FIELDS))
        .top(1);

    let result =
        fetch_collection::<OpportunityRecord>(gateway, credentials, OPPORTUNITY, &options).await;

    match Lookup::from(result.map(|rows| rows.into_iter().next())) {
        Lookup::Found(record) => Some(OpportunityInfo::from(record)),
        Lookup::NotFound => None,
        Lookup::Failed(err) => {
            warn!(opportunity_id, error = %err, "opportunity lookup failed; using placeholder");
            Some(OpportunityInfo::placeholder(opportunity_id))
        }
    }
}

async fn resolve_zide(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    opportunity_id: &str,
) -> Lookup<ServiceRequest> {
    let options = QueryOptions::new()
        .filter(build_filter(
            &[
                FilterCondition::eq("ID", opportunity_id),
                FilterCondition::eq("TypeCode", OPPORTUNITY_DOCUMENT_TYPE_CODE),
            ],
            LogicalOperator::And,
        ))
        .expand(build_expand(&[
            ExpandRelation::new("ServiceRequest").with_select(SERVICE_REQUEST_FIELDS)
        ]));

    let references = match fetch_collection::<DocumentReference>(
        gateway,
        credentials,
        SERVICE_REQUEST_DOC_REFERENCE,
        &options,
    )
    .await
    {
        Ok(references) => references,
        Err(err) => return Lookup::Failed(err),
    };

    debug!(opportunity_id, references = references.len(), "document references fetched");

    let ticket = references
        .into_iter()
        .filter_map(|reference| reference.service_request)
        .find(ServiceRequest::is_zide);

    match ticket {
        Some(ticket) => {
            info!(opportunity_id, ticket_id = %ticket.id, "resolved ZIDE service request");
            Lookup::Found(ticket)
        }
        None => Lookup::NotFound,
    }
}
