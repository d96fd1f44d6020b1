//! Application constants
//!
//! Centralized location for the fixed values of the C4C OData API: endpoint
//! layout, document codes, collection names and request timeouts.

// Endpoint layout
pub const DEFAULT_TENANT: &str = "my362429";
pub const TENANT_DOMAIN_SUFFIX: &str = ".crm.ondemand.com";
pub const ODATA_BASE_PATH: &str = "/sap/c4c/odata/v1/c4codataapi/";
pub const METADATA_PATH: &str = "$metadata";
pub const JSON_CONTENT_TYPE: &str = "application/json";

// Document flow codes
pub const OPPORTUNITY_DOCUMENT_TYPE_CODE: &str = "72";
pub const ZIDE_PROCESSING_TYPE_CODE: &str = "ZIDE";

// Timeouts (milliseconds)
pub const API_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const CONNECTION_TEST_TIMEOUT_MS: u64 = 10_000;

// Party roles requested when none are configured
pub const DEFAULT_ROLE_CODES: [&str; 4] = ["1001", "Z018", "Z031", "Z050"];

/// OData collection names exposed by the C4C tenant.
pub mod collections {
    // Service request
    pub const SERVICE_REQUEST_DOC_REFERENCE: &str =
        "ServiceRequestBusinessTransactionDocumentReferenceCollection";
    pub const SERVICE_REQUEST_PARTY: &str = "ServiceRequestPartyCollection";

    // Risk records
    pub const RISK_TOTAL_ROOT: &str = "BO_RiesgoAsesoriamientoRootCollection";
    pub const CUSTOMER_RISK_ROOT: &str = "BO_RiesgoCustomerRootCollection";
    pub const CUSTOMER_RISK_DETAIL: &str = "BO_RiesgoCustomerRiesgosClienteCollection";
    pub const KYM_RISK_ROOT: &str = "BO_RiesgoCustomerKYMRootCollection";

    // Opportunities
    pub const OPPORTUNITY: &str = "OpportunityCollection";
}
