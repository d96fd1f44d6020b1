//! SAP Cloud for Customer (C4C) OData integration
//!
//! - **Client**: `C4cClient` - authenticated reads and connection probing,
//!   implements `riskview_core::ODataGateway`
//! - **Errors**: `C4cError` - status classification and error envelope parsing

pub mod client;
pub mod errors;

pub use client::C4cClient;
pub use errors::{C4cError, C4cErrorCategory};
