//! # RiskView Core
//!
//! Lookup logic for C4C opportunity risk data - no HTTP code.
//!
//! This crate contains:
//! - OData query construction
//! - The `ODataGateway` port the HTTP client implements
//! - Document-flow, party and risk record resolution
//!
//! ## Architecture Principles
//! - Only depends on `riskview-domain`
//! - All backend access goes through [`ports::ODataGateway`]
//! - Credentials and role codes are explicit parameters; no ambient state

pub mod docflow;
pub mod lookup;
pub mod parties;
pub mod ports;
pub mod query;
pub mod risk;
pub mod roles;

#[cfg(test)]
mod test_support;

pub use docflow::{find_zide_by_opportunity, get_opportunity_info, has_zide_service_request};
pub use lookup::Lookup;
pub use parties::get_risk_parties;
pub use ports::{fetch_collection, ODataGateway};
pub use query::{
    build_expand, build_filter, build_multi_value_filter, build_query_string, build_raw_filter,
    build_select, QueryStringExt,
};
pub use risk::{fetch_risk_summary, get_customer_risk, get_kym_risk, get_risk_total};
pub use roles::{is_known_role, role_text};
