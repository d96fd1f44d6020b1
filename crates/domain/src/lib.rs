//! # RiskView Domain
//!
//! Business domain types and models for RiskView.
//!
//! This crate contains:
//! - C4C record types (service requests, parties, risk records)
//! - OData envelopes and query option structures
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Fixed backend codes and collection names
//!
//! ## Architecture
//! - No dependencies on other RiskView crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::datetime::parse_odata_datetime;
