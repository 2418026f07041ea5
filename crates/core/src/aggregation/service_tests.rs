//! Tests for the aggregation service's ranking and skip-on-failure behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use super::errors::AggregationError;
use super::model::TopAssetMetric;
use super::service::{AggregationService, AggregationServiceTrait, VolumeStore};
use crate::assets::{Asset, AssetRegistry};
use crate::errors::{Error, Result};
use crate::quotations::{AssetQuotation, QuotationError, QuotationServiceTrait};

// =============================================================================
// Collaborator stubs
// =============================================================================

/// Quotation stub keyed by asset address. Addresses absent from `prices`
/// (or `market_caps`, for that lookup) fail with `NoData`.
#[derive(Default)]
struct StubQuotations {
    prices: HashMap<String, f64>,
    market_caps: HashMap<String, f64>,
}

impl StubQuotations {
    fn lookup(map: &HashMap<String, f64>, asset: &Asset) -> Result<f64> {
        map.get(&asset.address)
            .copied()
            .ok_or_else(|| QuotationError::NoData.into())
    }
}

#[async_trait]
impl QuotationServiceTrait for StubQuotations {
    async fn set_price(&self, _asset: Asset, _price: f64, _time: DateTime<Utc>) -> Result<()> {
        unreachable!("aggregation never writes")
    }

    async fn set_quotation(&self, _quotation: &AssetQuotation) -> Result<()> {
        unreachable!("aggregation never writes")
    }

    async fn get_latest_price(&self, asset: &Asset) -> Result<f64> {
        Self::lookup(&self.prices, asset)
    }

    async fn get_latest_quotation(&self, asset: &Asset) -> Result<AssetQuotation> {
        let price = Self::lookup(&self.prices, asset)?;
        Ok(AssetQuotation::internal(asset.clone(), price, Utc::now()))
    }

    async fn get_price(
        &self,
        asset: &Asset,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<f64> {
        Self::lookup(&self.prices, asset)
    }

    async fn get_quotation(
        &self,
        asset: &Asset,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<AssetQuotation> {
        self.get_latest_quotation(asset).await
    }

    async fn get_quotations(
        &self,
        asset: &Asset,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<AssetQuotation>> {
        Ok(vec![self.get_latest_quotation(asset).await?])
    }

    async fn get_oldest_quotation(&self, asset: &Asset) -> Result<AssetQuotation> {
        self.get_latest_quotation(asset).await
    }

    async fn get_market_cap(&self, asset: &Asset) -> Result<f64> {
        Self::lookup(&self.market_caps, asset)
    }
}

#[derive(Default)]
struct StubVolumes {
    volumes: HashMap<String, f64>,
}

#[async_trait]
impl VolumeStore for StubVolumes {
    async fn get_24h_volume(&self, asset: &Asset) -> Result<f64> {
        self.volumes
            .get(&asset.address)
            .copied()
            .ok_or_else(|| Error::Unexpected(format!("no volume for {}", asset.address)))
    }
}

#[derive(Default)]
struct StubRegistry {
    by_symbol: HashMap<String, Vec<Asset>>,
}

#[async_trait]
impl AssetRegistry for StubRegistry {
    async fn get_assets_by_symbol(&self, symbol: &str) -> Result<Vec<Asset>> {
        Ok(self.by_symbol.get(symbol).cloned().unwrap_or_default())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn asset(symbol: &str, address: &str) -> Asset {
    Asset {
        symbol: symbol.to_string(),
        name: symbol.to_string(),
        address: address.to_string(),
        blockchain: "Ethereum".to_string(),
        decimals: 18,
    }
}

fn service(
    prices: &[(&str, f64)],
    market_caps: &[(&str, f64)],
    volumes: &[(&str, f64)],
    registry: &[(&str, &[Asset])],
) -> AggregationService {
    let to_map = |pairs: &[(&str, f64)]| {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect::<HashMap<_, _>>()
    };
    AggregationService::new(
        Arc::new(StubQuotations {
            prices: to_map(prices),
            market_caps: to_map(market_caps),
        }),
        Arc::new(StubVolumes {
            volumes: to_map(volumes),
        }),
        Arc::new(StubRegistry {
            by_symbol: registry
                .iter()
                .map(|(symbol, assets)| (symbol.to_string(), assets.to_vec()))
                .collect(),
        }),
    )
}

// =============================================================================
// Sorted quotations
// =============================================================================

#[tokio::test]
async fn test_sorted_quotations_descend_by_volume() {
    let service = service(
        &[("0xa", 1.0), ("0xb", 2.0), ("0xc", 3.0)],
        &[],
        &[("0xa", 5.0), ("0xb", 20.0), ("0xc", 10.0)],
        &[],
    );
    let assets = [asset("A", "0xa"), asset("B", "0xb"), asset("C", "0xc")];

    let ranked = service.get_sorted_quotations(&assets).await.unwrap();
    let volumes: Vec<_> = ranked.iter().map(|r| r.volume).collect();
    assert_eq!(volumes, vec![20.0, 10.0, 5.0]);
    assert_eq!(ranked[0].quotation.asset.symbol, "B");
}

#[tokio::test]
async fn test_sorted_quotations_skip_failed_lookups() {
    // "0xb" has a price but no volume, "0xc" has neither.
    let service = service(
        &[("0xa", 1.0), ("0xb", 2.0)],
        &[],
        &[("0xa", 5.0)],
        &[],
    );
    let assets = [asset("A", "0xa"), asset("B", "0xb"), asset("C", "0xc")];

    let ranked = service.get_sorted_quotations(&assets).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].quotation.asset.symbol, "A");
}

#[tokio::test]
async fn test_sorted_quotations_fail_only_when_all_skipped() {
    let service = service(&[], &[], &[], &[]);
    let assets = [asset("A", "0xa")];

    let err = service.get_sorted_quotations(&assets).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Aggregation(AggregationError::NoQuotations)
    ));
}

#[tokio::test]
async fn test_sorted_quotations_ties_reverse_input_order() {
    let service = service(
        &[("0xa", 1.0), ("0xb", 2.0)],
        &[],
        &[("0xa", 7.0), ("0xb", 7.0)],
        &[],
    );
    let assets = [asset("A", "0xa"), asset("B", "0xb")];

    let ranked = service.get_sorted_quotations(&assets).await.unwrap();
    let symbols: Vec<_> = ranked
        .iter()
        .map(|r| r.quotation.asset.symbol.as_str())
        .collect();
    assert_eq!(symbols, vec!["B", "A"]);
}

// =============================================================================
// Top asset by symbol
// =============================================================================

fn abc_candidates() -> Vec<Asset> {
    vec![
        asset("ABC", "0x1"),
        asset("ABC", "0x2"),
        asset("ABC", "0x3"),
    ]
}

#[tokio::test]
async fn test_top_asset_picks_greatest_market_cap() {
    let candidates = abc_candidates();
    let service = service(
        &[],
        &[("0x1", 0.0), ("0x2", 50.0), ("0x3", 30.0)],
        &[],
        &[("ABC", &candidates)],
    );

    let top = service
        .get_top_asset_by_symbol("ABC", TopAssetMetric::MarketCap)
        .await
        .unwrap();
    assert_eq!(top.address, "0x2");
}

#[tokio::test]
async fn test_top_asset_all_zero_is_no_quotation_error() {
    let candidates = abc_candidates();
    let service = service(
        &[],
        &[("0x1", 0.0), ("0x2", 0.0), ("0x3", 0.0)],
        &[],
        &[("ABC", &candidates)],
    );

    let err = service
        .get_top_asset_by_symbol("ABC", TopAssetMetric::MarketCap)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Aggregation(AggregationError::NoQuotationForSymbol(_))
    ));
}

#[tokio::test]
async fn test_top_asset_unknown_symbol_is_no_matching_asset() {
    let service = service(&[], &[], &[], &[]);

    let err = service
        .get_top_asset_by_symbol("XYZ", TopAssetMetric::Volume)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Aggregation(AggregationError::NoMatchingAsset(_))
    ));
}

#[tokio::test]
async fn test_top_asset_by_volume_skips_failed_lookups() {
    // Only "0x3" has a volume; the other lookups fail and are skipped.
    let candidates = abc_candidates();
    let service = service(&[], &[], &[("0x3", 12.0)], &[("ABC", &candidates)]);

    let top = service
        .get_top_asset_by_symbol("ABC", TopAssetMetric::Volume)
        .await
        .unwrap();
    assert_eq!(top.address, "0x3");
}

#[tokio::test]
async fn test_top_asset_tie_keeps_first_in_registry_order() {
    let candidates = abc_candidates();
    let service = service(
        &[],
        &[],
        &[("0x1", 9.0), ("0x2", 9.0), ("0x3", 9.0)],
        &[("ABC", &candidates)],
    );

    let top = service
        .get_top_asset_by_symbol("ABC", TopAssetMetric::Volume)
        .await
        .unwrap();
    assert_eq!(top.address, "0x1");
}
