//! Quotation-related error types.

use thiserror::Error;

/// Errors that can occur while reading or writing quotations across tiers.
#[derive(Error, Debug)]
pub enum QuotationError {
    /// Cache miss, empty range, or unresolved asset. Never fatal on a path
    /// that still has a fallback tier to try.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No quotation exists anywhere for the requested asset and range.
    #[error("No quotation in store")]
    NoData,

    /// A historical record's decimal precision could not be resolved through
    /// the asset join. The record is unusable; this is a hard error.
    #[error("Unresolved decimal precision: {0}")]
    UnresolvedPrecision(String),

    /// Transport or driver failure in one of the backing tiers.
    #[error("Tier unavailable: {0}")]
    TierUnavailable(String),

    /// Malformed asset reference, rejected before any tier call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A cached payload failed to serialize or deserialize.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A value retrieved from the time-series store could not be decoded
    /// into a price or an instant.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl QuotationError {
    /// True when the error means "nothing stored", as opposed to a failing tier.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QuotationError::NotFound(_) | QuotationError::NoData)
    }
}

impl From<serde_json::Error> for QuotationError {
    fn from(error: serde_json::Error) -> Self {
        QuotationError::Serialization(error.to_string())
    }
}
