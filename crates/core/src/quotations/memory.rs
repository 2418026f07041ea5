//! In-memory reference drivers for the cache and time-series tiers.
//!
//! These back the unit tests and give embedders a batteries-included setup;
//! production deployments provide network-backed drivers instead.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use super::store::{KeyValueStore, PointRow, PointSelection, PricePoint, PointStore, SortOrder};
use crate::errors::Result;

// =============================================================================
// Key-value store
// =============================================================================

/// In-memory key-value store with per-entry TTL.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: DashMap<String, (String, Instant)>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entries.get(key) {
            Some(entry) => {
                let (value, expires_at) = entry.value();
                if Instant::now() >= *expires_at {
                    drop(entry);
                    self.entries.remove(key);
                    Ok(None)
                } else {
                    Ok(Some(value.clone()))
                }
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }
}

// =============================================================================
// Point store
// =============================================================================

/// In-memory append-only point store.
///
/// Result rows use the same encodings a network point store would return:
/// RFC 3339 strings for timestamps and JSON numbers for prices.
#[derive(Default)]
pub struct MemoryPointStore {
    points: Mutex<Vec<PricePoint>>,
}

impl MemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored points, for test assertions.
    pub fn len(&self) -> usize {
        self.points.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PointStore for MemoryPointStore {
    async fn write_points(&self, points: Vec<PricePoint>) -> Result<()> {
        self.points.lock().unwrap().extend(points);
        Ok(())
    }

    async fn select_prices(&self, selection: &PointSelection) -> Result<Vec<PointRow>> {
        let points = self.points.lock().unwrap();

        let mut matching: Vec<&PricePoint> = points
            .iter()
            .filter(|p| {
                p.tags.get("address").map(String::as_str) == Some(selection.address.as_str())
                    && p.tags.get("blockchain").map(String::as_str)
                        == Some(selection.blockchain.as_str())
                    && selection.start.map_or(true, |start| p.time > start)
                    && selection.end.map_or(true, |end| p.time <= end)
            })
            .collect();

        match selection.order {
            SortOrder::Ascending => matching.sort_by_key(|p| p.time),
            SortOrder::Descending => {
                matching.sort_by_key(|p| p.time);
                matching.reverse();
            }
        }

        if let Some(limit) = selection.limit {
            matching.truncate(limit);
        }

        Ok(matching
            .into_iter()
            .map(|p| PointRow {
                time: Value::String(p.time.to_rfc3339()),
                price: json!(p.price),
            })
            .collect())
    }
}
