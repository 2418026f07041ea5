//! Ranking operations over quotation and market-signal lookups.

use async_trait::async_trait;
use log::warn;
use std::cmp::Ordering;
use std::sync::Arc;

use super::errors::AggregationError;
use super::model::{RankedQuotation, TopAssetMetric};
use crate::assets::{Asset, AssetRegistry};
use crate::errors::Result;
use crate::quotations::QuotationServiceTrait;

/// 24h trading volume lookup, supplied by an external market-data collaborator.
#[async_trait]
pub trait VolumeStore: Send + Sync {
    async fn get_24h_volume(&self, asset: &Asset) -> Result<f64>;
}

/// Read interface of the aggregation service.
#[async_trait]
pub trait AggregationServiceTrait: Send + Sync {
    /// Latest quotation plus 24h volume for each asset, ranked by volume
    /// descending. Assets whose lookups fail are skipped.
    async fn get_sorted_quotations(&self, assets: &[Asset]) -> Result<Vec<RankedQuotation>>;

    /// Resolves `symbol` through the registry and returns the record with
    /// the greatest value of the selected metric.
    async fn get_top_asset_by_symbol(
        &self,
        symbol: &str,
        metric: TopAssetMetric,
    ) -> Result<Asset>;
}

/// Aggregation over the quotation service and external market signals.
pub struct AggregationService {
    quotations: Arc<dyn QuotationServiceTrait>,
    volumes: Arc<dyn VolumeStore>,
    registry: Arc<dyn AssetRegistry>,
}

impl AggregationService {
    pub fn new(
        quotations: Arc<dyn QuotationServiceTrait>,
        volumes: Arc<dyn VolumeStore>,
        registry: Arc<dyn AssetRegistry>,
    ) -> Self {
        Self {
            quotations,
            volumes,
            registry,
        }
    }

    async fn metric_value(&self, asset: &Asset, metric: TopAssetMetric) -> Result<f64> {
        match metric {
            TopAssetMetric::Volume => self.volumes.get_24h_volume(asset).await,
            TopAssetMetric::MarketCap => self.quotations.get_market_cap(asset).await,
        }
    }
}

#[async_trait]
impl AggregationServiceTrait for AggregationService {
    async fn get_sorted_quotations(&self, assets: &[Asset]) -> Result<Vec<RankedQuotation>> {
        let mut ranked = Vec::with_capacity(assets.len());

        for asset in assets {
            let quotation = match self.quotations.get_latest_quotation(asset).await {
                Ok(quotation) => quotation,
                Err(e) => {
                    warn!(
                        "skipping {} on {}: quotation lookup failed: {}",
                        asset.symbol, asset.blockchain, e
                    );
                    continue;
                }
            };
            let volume = match self.volumes.get_24h_volume(asset).await {
                Ok(volume) => volume,
                Err(e) => {
                    warn!(
                        "skipping {} on {}: volume lookup failed: {}",
                        asset.symbol, asset.blockchain, e
                    );
                    continue;
                }
            };
            ranked.push(RankedQuotation { quotation, volume });
        }

        if ranked.is_empty() {
            return Err(AggregationError::NoQuotations.into());
        }

        // Stable ascending sort, then reversal. Equal volumes therefore come
        // out in reverse input order; kept as-is because ranking consumers
        // only contract on the volume ordering.
        ranked.sort_by(|a, b| a.volume.partial_cmp(&b.volume).unwrap_or(Ordering::Equal));
        ranked.reverse();
        Ok(ranked)
    }

    async fn get_top_asset_by_symbol(
        &self,
        symbol: &str,
        metric: TopAssetMetric,
    ) -> Result<Asset> {
        let candidates = self.registry.get_assets_by_symbol(symbol).await?;
        if candidates.is_empty() {
            return Err(AggregationError::NoMatchingAsset(symbol.to_string()).into());
        }

        // Strictly-greater comparison against a zero floor: a non-positive
        // metric never wins, and on an exact tie the first candidate in
        // registry order is kept.
        let mut top: Option<Asset> = None;
        let mut top_value = 0.0;

        for asset in candidates {
            let value = match self.metric_value(&asset, metric).await {
                Ok(value) => value,
                Err(e) => {
                    warn!(
                        "skipping {} on {}: metric lookup failed: {}",
                        asset.symbol, asset.blockchain, e
                    );
                    continue;
                }
            };
            if value > top_value {
                top_value = value;
                top = Some(asset);
            }
        }

        top.ok_or_else(|| AggregationError::NoQuotationForSymbol(symbol.to_string()).into())
    }
}
