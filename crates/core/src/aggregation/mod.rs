//! Aggregation service: rankings composed from quotations and market signals.
//!
//! Reads exclusively through the quotation service plus two external
//! collaborators (24h volume, asset registry). Never writes to any tier.

pub mod errors;
pub mod model;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use errors::AggregationError;
pub use model::{RankedQuotation, TopAssetMetric};
pub use service::{AggregationService, AggregationServiceTrait, VolumeStore};
