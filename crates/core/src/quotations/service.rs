//! Quotation service: read/write orchestration across the three tiers.
//!
//! Writes go through to the time-series tier and the cache (write-through);
//! latest-value reads are cache-first with a time-series fallback. The two
//! tiers are allowed to diverge transiently: availability is favored over
//! strict dual-write atomicity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, warn};
use std::sync::Arc;

use super::cache::QuotationCache;
use super::errors::QuotationError;
use super::model::AssetQuotation;
use super::series::QuotationSeries;
use super::store::{KeyValueStore, PointStore, SupplyStore};
use crate::assets::Asset;
use crate::constants::quotation_lookback;
use crate::errors::Result;

/// Read/write interface of the quotation store.
#[async_trait]
pub trait QuotationServiceTrait: Send + Sync {
    /// Stores the USD price of `asset`, tagged with the internal source.
    async fn set_price(&self, asset: Asset, price: f64, time: DateTime<Utc>) -> Result<()>;

    /// Stores a full quotation in the time-series tier and the cache.
    async fn set_quotation(&self, quotation: &AssetQuotation) -> Result<()>;

    /// Latest USD price of `asset`.
    async fn get_latest_price(&self, asset: &Asset) -> Result<f64>;

    /// Latest full quotation for `asset`: cache first, time-series fallback.
    async fn get_latest_quotation(&self, asset: &Asset) -> Result<AssetQuotation>;

    /// USD price of `asset` as of a historical range `(start, end]`.
    async fn get_price(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64>;

    /// Most recent quotation in `(start, end]`, bypassing the cache.
    async fn get_quotation(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AssetQuotation>;

    /// Full ranged history, descending by time.
    async fn get_quotations(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AssetQuotation>>;

    /// The earliest quotation ever recorded for `asset`.
    async fn get_oldest_quotation(&self, asset: &Asset) -> Result<AssetQuotation>;

    /// Latest price times circulating supply. Fails if either lookup fails.
    async fn get_market_cap(&self, asset: &Asset) -> Result<f64>;
}

/// Quotation service over the cache and time-series tiers.
///
/// Store handles are explicit constructor dependencies; there is no ambient
/// client lookup.
pub struct QuotationService {
    cache: QuotationCache,
    series: QuotationSeries,
    supply_store: Arc<dyn SupplyStore>,
}

impl QuotationService {
    pub fn new(
        cache_store: Arc<dyn KeyValueStore>,
        point_store: Arc<dyn PointStore>,
        supply_store: Arc<dyn SupplyStore>,
    ) -> Self {
        Self {
            cache: QuotationCache::new(cache_store),
            series: QuotationSeries::new(point_store),
            supply_store,
        }
    }

    fn validate(quotation: &AssetQuotation) -> Result<()> {
        Self::validate_asset(&quotation.asset)?;
        if quotation.price < 0.0 || !quotation.price.is_finite() {
            return Err(
                QuotationError::InvalidInput(format!("price {}", quotation.price)).into(),
            );
        }
        Ok(())
    }

    fn validate_asset(asset: &Asset) -> Result<()> {
        if !asset.is_valid() {
            return Err(QuotationError::InvalidInput(format!(
                "asset reference '{}' on '{}'",
                asset.address, asset.blockchain
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl QuotationServiceTrait for QuotationService {
    async fn set_price(&self, asset: Asset, price: f64, time: DateTime<Utc>) -> Result<()> {
        self.set_quotation(&AssetQuotation::internal(asset, price, time))
            .await
    }

    async fn set_quotation(&self, quotation: &AssetQuotation) -> Result<()> {
        Self::validate(quotation)?;

        // The series append is the non-authoritative side of the dual write:
        // a failure is logged and the cache write still proceeds.
        if let Err(e) = self.series.append(quotation).await {
            error!(
                "append quotation for {} on {}: {}",
                quotation.asset.symbol, quotation.asset.blockchain, e
            );
        }

        // Latest write wins by recency of call; freshness enforcement is
        // opt-in for callers that may deliver data out of order.
        self.cache.put(quotation, false).await?;
        Ok(())
    }

    async fn get_latest_price(&self, asset: &Asset) -> Result<f64> {
        Ok(self.get_latest_quotation(asset).await?.price)
    }

    async fn get_latest_quotation(&self, asset: &Asset) -> Result<AssetQuotation> {
        Self::validate_asset(asset)?;

        match self.cache.get(asset).await {
            Ok(Some(quotation)) => {
                debug!("got quotation for {} from cache", asset.symbol);
                return Ok(quotation);
            }
            Ok(None) => {
                debug!("{} not in cache, querying time-series tier", asset.symbol);
            }
            // A failing cache read is a miss, not a hard error: fall through.
            Err(e) => {
                warn!("cache read for {} failed, falling back: {}", asset.symbol, e);
            }
        }

        let end = Utc::now();
        let start = end - quotation_lookback();
        let quotation = self.series.latest_before(asset, start, end).await?;

        // Read-through: repopulate the latest-value slot. Freshness is
        // enforced so a concurrent writer cannot be clobbered by this
        // backfill; a failure here does not affect the read.
        if let Err(e) = self.cache.put(&quotation, true).await {
            warn!("cache backfill for {} failed: {}", asset.symbol, e);
        }

        Ok(quotation)
    }

    async fn get_price(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<f64> {
        Ok(self.get_quotation(asset, start, end).await?.price)
    }

    async fn get_quotation(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AssetQuotation> {
        Self::validate_asset(asset)?;
        self.series.latest_before(asset, start, end).await
    }

    async fn get_quotations(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AssetQuotation>> {
        Self::validate_asset(asset)?;
        self.series.range(asset, start, end).await
    }

    async fn get_oldest_quotation(&self, asset: &Asset) -> Result<AssetQuotation> {
        Self::validate_asset(asset)?;
        self.series.oldest(asset).await
    }

    async fn get_market_cap(&self, asset: &Asset) -> Result<f64> {
        let price = self.get_latest_price(asset).await?;
        let supply = self.supply_store.get_circulating_supply(asset).await?;
        Ok(price * supply)
    }
}
