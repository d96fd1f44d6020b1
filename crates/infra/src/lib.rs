//! # RiskView Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client with a per-request timeout
//! - The C4C OData client implementing `riskview_core::ODataGateway`
//! - Configuration loading (environment, JSON, TOML)
//!
//! ## Architecture
//! - Implements traits defined in `riskview-core`
//! - Contains all "impure" code (network and file I/O)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::c4c::{C4cClient, C4cError, C4cErrorCategory};
