//! Pricebook Core - Domain entities, tier logic, and services.
//!
//! This crate contains the read/write orchestration for the tiered
//! price-quotation store. It is database-agnostic: the cache and time-series
//! drivers are capability traits, and the relational historical tier is a
//! trait implemented by the `storage-sqlite` crate.

pub mod aggregation;
pub mod assets;
pub mod constants;
pub mod errors;
pub mod quotations;

// Re-export common types
pub use aggregation::{AggregationError, AggregationService, AggregationServiceTrait};
pub use assets::{Asset, AssetRegistry};
pub use quotations::{AssetQuotation, QuotationError, QuotationService, QuotationServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
