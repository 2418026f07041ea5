//! Tier capability traits.
//!
//! The three backing tiers are shared, externally-owned stores. The concrete
//! drivers (Redis-style cache, Influx-style point store, relational database)
//! live outside this crate; these traits are the capability surface the tier
//! logic is written against, allowing different backends to be used
//! interchangeably and mock implementations in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use super::model::AssetQuotation;
use crate::assets::Asset;
use crate::errors::Result;

// =============================================================================
// Cache driver
// =============================================================================

/// Key-value store with per-entry time-to-live.
///
/// Keys are opaque strings; the cache tier owns the key scheme. `get`
/// distinguishes "not present" (`Ok(None)`) from transport failure (`Err`).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

// =============================================================================
// Time-series driver
// =============================================================================

/// A single observation as handed to the point-store driver.
///
/// Tags make the series self-describing for downstream tooling; `price` is
/// the only measured field.
#[derive(Debug, Clone)]
pub struct PricePoint {
    pub tags: HashMap<String, String>,
    pub price: f64,
    pub time: DateTime<Utc>,
}

/// Sort direction for point queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A filter over the price series of one asset.
///
/// The time bounds follow the store convention `start < time <= end`; either
/// bound may be open.
#[derive(Debug, Clone)]
pub struct PointSelection {
    pub address: String,
    pub blockchain: String,
    /// Exclusive lower bound.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound.
    pub end: Option<DateTime<Utc>>,
    pub order: SortOrder,
    pub limit: Option<usize>,
}

/// One raw result row from the point store.
///
/// Values keep the store's native encoding (string-encoded timestamps,
/// deferred-precision numbers); the series tier decodes them losslessly.
#[derive(Debug, Clone)]
pub struct PointRow {
    pub time: Value,
    pub price: Value,
}

/// Schema-less, append-only point store keyed by tag set and timestamp.
#[async_trait]
pub trait PointStore: Send + Sync {
    async fn write_points(&self, points: Vec<PricePoint>) -> Result<()>;
    async fn select_prices(&self, selection: &PointSelection) -> Result<Vec<PointRow>>;
}

// =============================================================================
// Historical tier
// =============================================================================

/// Relational store of deduplicated historical quotes, joined against asset
/// metadata for decimal precision.
///
/// Implemented by the `storage-sqlite` crate.
#[async_trait]
pub trait HistoricalQuotationStore: Send + Sync {
    /// Inserts one quotation. Idempotent: a second insert with the same
    /// `(asset, time, source)` key is a no-op, not an error.
    async fn insert(&self, quotation: &AssetQuotation) -> Result<()>;

    /// Returns all quotations for `asset` with `start < time < end`, ascending
    /// by time. Each record carries the asset's decimal precision resolved via
    /// the join; an unresolved precision is a hard error.
    async fn query_range(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AssetQuotation>>;

    /// Most recent recorded time for `asset`, or `None` if nothing is stored.
    async fn last_timestamp(&self, asset: &Asset) -> Result<Option<DateTime<Utc>>>;
}

// =============================================================================
// Supply collaborator
// =============================================================================

/// External supply-cache collaborator, consumed by market-cap computation.
#[async_trait]
pub trait SupplyStore: Send + Sync {
    async fn get_circulating_supply(&self, asset: &Asset) -> Result<f64>;
}
