//! Domain types and models
//!
//! Record types mirror the C4C OData entities they are decoded from. Every
//! backend field is optional and unknown fields are ignored, so a tenant with
//! extra custom fields (or missing ones) still decodes.

pub mod credentials;
pub mod docflow;
pub mod odata;
pub mod party;
pub mod query;
pub mod risk;

pub use credentials::Credentials;
pub use docflow::{DocumentReference, OpportunityInfo, OpportunityRecord, ServiceRequest};
pub use odata::{
    ODataErrorBody, ODataErrorEnvelope, ODataErrorMessage, ODataResponse, ODataResults,
    ODataSingleResponse,
};
pub use party::Party;
pub use query::{
    ExpandRelation, FilterCondition, FilterOperator, FilterValue, LogicalOperator, QueryOptions,
};
pub use risk::{
    ChangeTracked, CustomerRisk, CustomerRiskDetail, KymRisk, RiskLevel, RiskSummary, RiskTotal,
};
