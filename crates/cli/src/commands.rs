//! Command implementations. Each prints a JSON document to stdout.

use std::env;

use anyhow::{bail, Context};
use riskview_core::{
    fetch_risk_summary, find_zide_by_opportunity, get_opportunity_info, get_risk_parties,
    role_text,
};
use riskview_domain::{Credentials, Party, RiskViewConfig};
use riskview_infra::{config, C4cClient};
use serde::Serialize;
use serde_json::json;
use tracing::info;

/// Role whose party the KYM record is narrowed to on the dashboard.
const CUSTOMER_ROLE_CODE: &str = "Z018";

/// Loaded configuration, credentials and client for one invocation.
struct Session {
    config: RiskViewConfig,
    credentials: Credentials,
    client: C4cClient,
}

impl Session {
    fn from_env() -> anyhow::Result<Self> {
        let config = config::load().context("could not load configuration")?;

        let username = env::var("RISKVIEW_USERNAME").unwrap_or_default();
        let password = env::var("RISKVIEW_PASSWORD").unwrap_or_default();
        let credentials = Credentials::new(&config.c4c.tenant, username, password)
            .context("set RISKVIEW_USERNAME and RISKVIEW_PASSWORD")?;

        let client = C4cClient::new(config.c4c.clone())?;
        info!(tenant = credentials.tenant(), "session ready");

        Ok(Self { config, credentials, client })
    }
}

/// Party with its role label resolved from the catalogue when the backend
/// sent no text.
#[derive(Serialize)]
struct PartyView<'a> {
    #[serde(flatten)]
    party: &'a Party,
    role: Option<&'a str>,
}

fn party_views(parties: &[Party]) -> Vec<PartyView<'_>> {
    parties
        .iter()
        .map(|party| {
            let role = party
                .role_code_text
                .as_deref()
                .or_else(|| party.role_code.as_deref().and_then(role_text));
            PartyView { party, role }
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn required_arg<'a>(args: &'a [String], index: usize, name: &str) -> anyhow::Result<&'a str> {
    match args.get(index) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim()),
        _ => bail!("missing argument <{name}>"),
    }
}

pub async fn probe() -> anyhow::Result<()> {
    let session = Session::from_env()?;
    let connected = session.client.test_connection(&session.credentials).await;

    print_json(&json!({
        "tenant": session.credentials.tenant(),
        "base_url": session.client.base_url(&session.credentials),
        "connected": connected,
    }))?;

    if !connected {
        bail!("connection test failed");
    }
    Ok(())
}

pub async fn resolve(args: &[String]) -> anyhow::Result<()> {
    let opportunity_id = required_arg(args, 0, "opportunity")?;
    let session = Session::from_env()?;

    let (opportunity, ticket) = tokio::join!(
        get_opportunity_info(&session.client, &session.credentials, opportunity_id),
        find_zide_by_opportunity(&session.client, &session.credentials, opportunity_id),
    );

    print_json(&json!({
        "opportunity": opportunity,
        "service_request": ticket?,
    }))
}

pub async fn parties(args: &[String]) -> anyhow::Result<()> {
    let parent_object_id = required_arg(args, 0, "parent-object-id")?;
    let session = Session::from_env()?;

    let roles: Vec<String> = match args.get(1..) {
        Some(roles) if !roles.is_empty() => roles.to_vec(),
        _ => session.config.roles.codes.clone(),
    };

    let parties =
        get_risk_parties(&session.client, &session.credentials, parent_object_id, &roles).await?;

    print_json(&party_views(&parties))
}

pub async fn risks(args: &[String]) -> anyhow::Result<()> {
    let opportunity_id = required_arg(args, 0, "opportunity")?;
    let ticket_id = required_arg(args, 1, "ticket")?;
    let party_id = args.get(2).map(String::as_str);
    let session = Session::from_env()?;

    let summary = fetch_risk_summary(
        &session.client,
        &session.credentials,
        opportunity_id,
        ticket_id,
        party_id,
    )
    .await;

    print_json(&json!({
        "summary": summary,
        "risk_level": summary.risk_total.as_ref().map(|total| total.risk_level()),
    }))
}

pub async fn dashboard(args: &[String]) -> anyhow::Result<()> {
    let opportunity_id = required_arg(args, 0, "opportunity")?;
    let session = Session::from_env()?;
    let (client, credentials) = (&session.client, &session.credentials);

    let opportunity = get_opportunity_info(client, credentials, opportunity_id).await;
    let Some(ticket) = find_zide_by_opportunity(client, credentials, opportunity_id).await? else {
        return print_json(&json!({
            "opportunity": opportunity,
            "service_request": null,
        }));
    };

    let parties =
        get_risk_parties(client, credentials, &ticket.object_id, &session.config.roles.codes)
            .await?;
    let customer_party = parties
        .iter()
        .find(|party| party.role_code.as_deref() == Some(CUSTOMER_ROLE_CODE))
        .map(|party| party.party_id.as_str());

    let summary =
        fetch_risk_summary(client, credentials, opportunity_id, &ticket.id, customer_party).await;

    print_json(&json!({
        "opportunity": opportunity,
        "service_request": ticket,
        "parties": party_views(&parties),
        "risks": summary,
        "risk_level": summary.risk_total.as_ref().map(|total| total.risk_level()),
    }))
}
