//! Aggregation-related error types.

use thiserror::Error;

/// Errors produced by batch aggregation operations.
///
/// Per-asset lookup failures are never surfaced individually; a batch fails
/// only when its success set is empty.
#[derive(Error, Debug)]
pub enum AggregationError {
    /// Every asset in the batch failed its quotation or volume lookup.
    #[error("No quotations available")]
    NoQuotations,

    /// The registry has no asset record for the requested symbol.
    #[error("No matching asset for symbol '{0}'")]
    NoMatchingAsset(String),

    /// All candidate assets for the symbol had a non-positive or
    /// unavailable metric.
    #[error("No quotation for symbol '{0}'")]
    NoQuotationForSymbol(String),
}
