//! Cache tier: a TTL-bounded latest-value slot per asset.
//!
//! The cache holds at most one quotation per asset and is independently
//! writable, so it can race with time-series writes. The freshness protocol
//! in [`QuotationCache::put`] keeps the cached record's time the maximum time
//! ever accepted into the cache for that asset.

use log::error;
use std::sync::Arc;
use std::time::Duration;

use super::errors::QuotationError;
use super::model::AssetQuotation;
use super::store::KeyValueStore;
use crate::assets::Asset;
use crate::constants::cache_ttl;
use crate::errors::Result;

const KEY_PREFIX: &str = "pricebook_quotation_usd_";

/// Cache key for the latest USD quotation of an asset.
fn quotation_key(asset: &Asset) -> String {
    format!("{}{}_{}", KEY_PREFIX, asset.blockchain, asset.address)
}

/// Latest-quotation cache over a TTL key-value driver.
pub struct QuotationCache {
    store: Arc<dyn KeyValueStore>,
    ttl: Duration,
}

impl QuotationCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            ttl: cache_ttl(),
        }
    }

    /// Stores `quotation` as the asset's latest value.
    ///
    /// With `enforce_freshness`, the current entry is read first and the write
    /// is skipped (`Ok(false)`) when the existing entry's time is newer than
    /// or equal to the incoming time, so an out-of-order writer cannot clobber
    /// a more recent value. A missing entry counts as infinitely old, so the
    /// first write always proceeds; a failing read aborts the put.
    ///
    /// This is an optimistic read-then-conditional-write: a small race window
    /// remains between check and write. A driver with a native compare-and-swap
    /// may close it, as long as writes are still skipped iff the existing time
    /// is greater than or equal to the incoming one.
    pub async fn put(&self, quotation: &AssetQuotation, enforce_freshness: bool) -> Result<bool> {
        if enforce_freshness {
            if let Some(existing) = self.get(&quotation.asset).await? {
                if existing.time >= quotation.time {
                    return Ok(false);
                }
            }
        }

        let key = quotation_key(&quotation.asset);
        let payload = serde_json::to_string(quotation).map_err(QuotationError::from)?;
        self.store.set(&key, &payload, self.ttl).await?;
        Ok(true)
    }

    /// Returns the cached latest quotation, or `None` on a cache miss.
    ///
    /// A transport failure is an `Err`, distinct from a miss.
    pub async fn get(&self, asset: &Asset) -> Result<Option<AssetQuotation>> {
        let key = quotation_key(asset);
        let payload = match self.store.get(&key).await {
            Ok(payload) => payload,
            Err(e) => {
                error!("cache get for {} on {}: {}", asset.symbol, asset.blockchain, e);
                return Err(e);
            }
        };

        match payload {
            Some(raw) => {
                let quotation: AssetQuotation =
                    serde_json::from_str(&raw).map_err(QuotationError::from)?;
                Ok(Some(quotation))
            }
            None => Ok(None),
        }
    }

    /// Latest cached USD price, or `None` on a cache miss.
    pub async fn get_price(&self, asset: &Asset) -> Result<Option<f64>> {
        Ok(self.get(asset).await?.map(|quotation| quotation.price))
    }
}
