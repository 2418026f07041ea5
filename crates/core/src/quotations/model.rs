//! Quotation domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assets::Asset;

/// Source identifier for quotations produced by the platform's own aggregator.
pub const DATA_SOURCE_INTERNAL: &str = "INTERNAL_AGGREGATOR";

/// A single USD price observation for an asset.
///
/// Created by an upstream price producer and handed to the quotation
/// service's write path; never mutated after creation. `(asset, time, source)`
/// is the natural dedup key for historical storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuotation {
    pub asset: Asset,
    /// USD price. Invariant: non-negative.
    pub price: f64,
    /// Observation instant, UTC.
    pub time: DateTime<Utc>,
    /// Identifier of the producer that observed this price.
    pub source: String,
}

impl AssetQuotation {
    /// Builds a quotation tagged with the internal source identifier.
    pub fn internal(asset: Asset, price: f64, time: DateTime<Utc>) -> Self {
        Self {
            asset,
            price,
            time,
            source: DATA_SOURCE_INTERNAL.to_string(),
        }
    }
}
