//! Risk record fetchers
//!
//! Each fetcher returns the most recently changed record matching either the
//! opportunity or its service request, or `None` when nothing matches.

use chrono::Utc;
use riskview_domain::constants::collections::{
    CUSTOMER_RISK_DETAIL, CUSTOMER_RISK_ROOT, KYM_RISK_ROOT, RISK_TOTAL_ROOT,
};
use riskview_domain::{
    ChangeTracked, Credentials, CustomerRisk, CustomerRiskDetail, FilterCondition, KymRisk,
    LogicalOperator, QueryOptions, Result, RiskSummary, RiskTotal, RiskViewError,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::ports::{fetch_collection, ODataGateway};
use crate::query::{build_filter, build_raw_filter};

const MOST_RECENT_FIRST: &str = "LastChangeDateTime desc";

/// Aggregate advisory risk for the opportunity/ticket pair.
pub async fn get_risk_total(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    opportunity_id: &str,
    service_request_id: &str,
) -> Result<Option<RiskTotal>> {
    let filter = opportunity_or_ticket(opportunity_id, service_request_id);
    fetch_most_recent(gateway, credentials, RISK_TOTAL_ROOT, filter)
        .await
        .map_err(|err| RiskViewError::lookup("Could not fetch the total risk", err))
}

/// Customer risk root plus its detail rows.
///
/// The detail fetch runs only after the root is known. If it fails, the root
/// is still returned with an empty `detalle`.
pub async fn get_customer_risk(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    opportunity_id: &str,
    service_request_id: &str,
) -> Result<Option<CustomerRisk>> {
    let filter = opportunity_or_ticket(opportunity_id, service_request_id);
    let root = fetch_most_recent::<CustomerRisk>(gateway, credentials, CUSTOMER_RISK_ROOT, filter)
        .await
        .map_err(|err| RiskViewError::lookup("Could not fetch the customer risk", err))?;

    let Some(mut root) = root else {
        return Ok(None);
    };

    if let Some(root_id) = root.object_id.clone().filter(|id| !id.is_empty()) {
        root.detalle = fetch_customer_risk_detail(gateway, credentials, &root_id).await;
    }

    Ok(Some(root))
}

/// Know-your-customer risk, optionally narrowed to one party.
pub async fn get_kym_risk(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    opportunity_id: &str,
    service_request_id: &str,
    party_id: Option<&str>,
) -> Result<Option<KymRisk>> {
    let mut filter = opportunity_or_ticket(opportunity_id, service_request_id);
    if let Some(party_id) = party_id.map(str::trim).filter(|id| !id.is_empty()) {
        let party_clause =
            build_filter(&[FilterCondition::eq("IDCustomer", party_id)], LogicalOperator::And);
        filter = build_raw_filter(&[filter, party_clause], LogicalOperator::And);
    }

    fetch_most_recent(gateway, credentials, KYM_RISK_ROOT, filter)
        .await
        .map_err(|err| RiskViewError::lookup("Could not fetch the KYM risk", err))
}

/// Fetch all three risk records concurrently.
///
/// A failing fetcher leaves its record empty and its message in the summary;
/// the other two are unaffected.
pub async fn fetch_risk_summary(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    opportunity_id: &str,
    service_request_id: &str,
    party_id: Option<&str>,
) -> RiskSummary {
    let (risk_total, customer_risk, kym_risk) = tokio::join!(
        get_risk_total(gateway, credentials, opportunity_id, service_request_id),
        get_customer_risk(gateway, credentials, opportunity_id, service_request_id),
        get_kym_risk(gateway, credentials, opportunity_id, service_request_id, party_id),
    );

    let (risk_total, risk_total_error) = split_outcome(risk_total);
    let (customer_risk, customer_risk_error) = split_outcome(customer_risk);
    let (kym_risk, kym_risk_error) = split_outcome(kym_risk);

    let summary = RiskSummary {
        opportunity_id: opportunity_id.to_string(),
        service_request_id: service_request_id.to_string(),
        risk_total,
        customer_risk,
        kym_risk,
        risk_total_error,
        customer_risk_error,
        kym_risk_error,
        fetched_at: Utc::now(),
    };

    if summary.has_errors() {
        warn!(opportunity_id, service_request_id, "risk summary is incomplete");
    }

    summary
}

async fn fetch_customer_risk_detail(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    root_id: &str,
) -> Vec<CustomerRiskDetail> {
    let filter =
        build_filter(&[FilterCondition::eq("ParentObjectID", root_id)], LogicalOperator::And);
    let options = QueryOptions::new().filter(filter);

    match fetch_collection(gateway, credentials, CUSTOMER_RISK_DETAIL, &options).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(root_id, error = %err, "customer risk detail unavailable; continuing without it");
            Vec::new()
        }
    }
}

async fn fetch_most_recent<T>(
    gateway: &dyn ODataGateway,
    credentials: &Credentials,
    collection: &str,
    filter: String,
) -> Result<Option<T>>
where
    T: DeserializeOwned + ChangeTracked,
{
    let options = QueryOptions::new().filter(filter).orderby(MOST_RECENT_FIRST).top(1);
    let rows = fetch_collection::<T>(gateway, credentials, collection, &options).await?;
    debug!(collection, rows = rows.len(), "risk records fetched");
    Ok(select_most_recent(rows))
}

/// Latest row by `LastChangeDateTime`, ties and unparseable stamps resolved in
/// favour of backend order.
fn select_most_recent<T: ChangeTracked>(rows: Vec<T>) -> Option<T> {
    let mut best: Option<T> = None;
    for row in rows {
        let newer = match &best {
            Some(current) => row.last_changed_at() > current.last_changed_at(),
            None => true,
        };
        if newer {
            best = Some(row);
        }
    }
    best
}

fn opportunity_or_ticket(opportunity_id: &str, service_request_id: &str) -> String {
    let either = build_filter(
        &[
            FilterCondition::eq("IDOpp", opportunity_id),
            FilterCondition::eq("IDTicket", service_request_id),
        ],
        LogicalOperator::Or,
    );
    format!("({either})")
}

fn split_outcome<T>(outcome: Result<Option<T>>) -> (Option<T>, Option<String>) {
    match outcome {
        Ok(record) => (record, None),
        Err(err) => (None, Some(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use riskview_domain::RiskLevel;
    use serde_json::json;

    use super::*;
    use crate::test_support::{credentials, MockGateway};

    #[tokio::test]
    async fn risk_total_query_matches_opportunity_or_ticket() {
        let gateway = MockGateway::new();

        let total = get_risk_total(&gateway, &credentials(), "OPP123", "SR-1").await.unwrap();

        assert!(total.is_none());
        let call = &gateway.calls_to(RISK_TOTAL_ROOT)[0];
        assert_eq!(call.filter.as_deref(), Some("(IDOpp eq 'OPP123' or IDTicket eq 'SR-1')"));
        assert_eq!(call.orderby.as_deref(), Some("LastChangeDateTime desc"));
        assert_eq!(call.top, Some(1));
    }

    #[tokio::test]
    async fn latest_row_wins_regardless_of_backend_order() {
        let gateway = MockGateway::new().with_rows(
            RISK_TOTAL_ROOT,
            json!([
                { "ObjectID": "OLD", "LastChangeDateTime": "/Date(1600000000000)/" },
                { "ObjectID": "NEW", "z_PuntajeAsesoramiento_KUT": "8.5",
                  "LastChangeDateTime": "/Date(1700000000000)/" }
            ]),
        );

        let total =
            get_risk_total(&gateway, &credentials(), "OPP123", "SR-1").await.unwrap().unwrap();

        assert_eq!(total.object_id.as_deref(), Some("NEW"));
        assert_eq!(total.risk_level(), RiskLevel::VeryHigh);
    }

    #[tokio::test]
    async fn customer_risk_includes_detail_rows() {
        let gateway = MockGateway::new()
            .with_rows(CUSTOMER_RISK_ROOT, json!([{ "ObjectID": "ROOT1", "IDOpp": "OPP123" }]))
            .with_rows(
                CUSTOMER_RISK_DETAIL,
                json!([{ "ParentObjectID": "ROOT1", "z_Campo_KUT": "Pais", "z_Puntaje_KUT": "3" }]),
            );

        let risk =
            get_customer_risk(&gateway, &credentials(), "OPP123", "SR-1").await.unwrap().unwrap();

        assert_eq!(risk.detalle.len(), 1);
        assert_eq!(risk.detalle[0].score, Some(3.0));
        let detail_call = &gateway.calls_to(CUSTOMER_RISK_DETAIL)[0];
        assert_eq!(detail_call.filter.as_deref(), Some("ParentObjectID eq 'ROOT1'"));
    }

    #[tokio::test]
    async fn customer_risk_detail_failure_keeps_root() {
        let gateway = MockGateway::new()
            .with_rows(
                CUSTOMER_RISK_ROOT,
                json!([{ "ObjectID": "ROOT1", "z_PuntajeRiesgo_KUT": 4 }]),
            )
            .with_error(CUSTOMER_RISK_DETAIL, RiskViewError::Network("reset".into()));

        let risk =
            get_customer_risk(&gateway, &credentials(), "OPP123", "SR-1").await.unwrap().unwrap();

        assert_eq!(risk.object_id.as_deref(), Some("ROOT1"));
        assert_eq!(risk.risk_score, Some(4.0));
        assert!(risk.detalle.is_empty());
    }

    #[tokio::test]
    async fn customer_risk_without_object_id_skips_detail() {
        let gateway =
            MockGateway::new().with_rows(CUSTOMER_RISK_ROOT, json!([{ "IDOpp": "OPP123" }]));

        let risk =
            get_customer_risk(&gateway, &credentials(), "OPP123", "SR-1").await.unwrap().unwrap();

        assert!(risk.detalle.is_empty());
        assert!(gateway.calls_to(CUSTOMER_RISK_DETAIL).is_empty());
    }

    #[tokio::test]
    async fn kym_filter_adds_party_clause() {
        let gateway = MockGateway::new();

        get_kym_risk(&gateway, &credentials(), "OPP123", "SR-1", Some("P1")).await.unwrap();
        get_kym_risk(&gateway, &credentials(), "OPP123", "SR-1", None).await.unwrap();

        let calls = gateway.calls_to(KYM_RISK_ROOT);
        assert_eq!(
            calls[0].filter.as_deref(),
            Some("(IDOpp eq 'OPP123' or IDTicket eq 'SR-1') and IDCustomer eq 'P1'")
        );
        assert_eq!(calls[1].filter.as_deref(), Some("(IDOpp eq 'OPP123' or IDTicket eq 'SR-1')"));
    }

    #[tokio::test]
    async fn kym_blank_party_does_not_narrow_filter() {
        let gateway = MockGateway::new();

        get_kym_risk(&gateway, &credentials(), "OPP123", "SR-1", Some("")).await.unwrap();
        get_kym_risk(&gateway, &credentials(), "OPP123", "SR-1", Some("  ")).await.unwrap();

        for call in gateway.calls_to(KYM_RISK_ROOT) {
            assert_eq!(call.filter.as_deref(), Some("(IDOpp eq 'OPP123' or IDTicket eq 'SR-1')"));
        }
    }

    #[tokio::test]
    async fn fetch_failures_carry_fixed_context() {
        let gateway = MockGateway::new()
            .with_error(KYM_RISK_ROOT, RiskViewError::Timeout("30000ms".into()));

        let err = get_kym_risk(&gateway, &credentials(), "OPP123", "SR-1", None).await.unwrap_err();

        assert!(err.to_string().starts_with("Could not fetch the KYM risk: "));
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn summary_isolates_failing_fetchers() {
        let gateway = MockGateway::new()
            .with_rows(RISK_TOTAL_ROOT, json!([{ "ObjectID": "T1" }]))
            .with_error(CUSTOMER_RISK_ROOT, RiskViewError::Auth("HTTP 403: Forbidden".into()))
            .with_rows(KYM_RISK_ROOT, json!([{ "IDCustomer": "P1" }]));

        let summary =
            fetch_risk_summary(&gateway, &credentials(), "OPP123", "SR-1", Some("P1")).await;

        assert_eq!(summary.risk_total.as_ref().unwrap().object_id.as_deref(), Some("T1"));
        assert!(summary.customer_risk.is_none());
        assert!(summary.customer_risk_error.as_ref().unwrap().starts_with("Could not fetch the customer risk"));
        assert_eq!(summary.kym_risk.as_ref().unwrap().customer_id.as_deref(), Some("P1"));
        assert!(summary.risk_total_error.is_none());
        assert_eq!(summary.service_request_id, "SR-1");
        assert!(summary.has_errors());
    }

    #[test]
    fn unparseable_stamps_keep_backend_order() {
        let rows = vec![
            RiskTotal { object_id: Some("A".into()), ..Default::default() },
            RiskTotal {
                object_id: Some("B".into()),
                last_change_date_time: Some("garbage".into()),
                ..Default::default()
            },
        ];

        assert_eq!(select_most_recent(rows).unwrap().object_id.as_deref(), Some("A"));
    }
}
