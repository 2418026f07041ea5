//! Time-series tier: append-only price history, queryable by range.
//!
//! Every point carries the identifying tag set {symbol, name, address,
//! blockchain} so the series is self-describing; price is the single measured
//! field. Retrieved values arrive in the store's native encoding and are
//! decoded here.

use chrono::{DateTime, Utc};
use log::error;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::errors::QuotationError;
use super::model::{AssetQuotation, DATA_SOURCE_INTERNAL};
use super::store::{PointRow, PointSelection, PointStore, PricePoint, SortOrder};
use crate::assets::Asset;
use crate::errors::Result;

/// Escapes tag values for the point store's line protocol.
fn escape_tag(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(' ', "\\ ")
        .replace(',', "\\,")
        .replace('=', "\\=")
}

fn tags_for(asset: &Asset) -> HashMap<String, String> {
    HashMap::from([
        ("symbol".to_string(), escape_tag(&asset.symbol)),
        ("name".to_string(), escape_tag(&asset.name)),
        ("address".to_string(), asset.address.clone()),
        ("blockchain".to_string(), asset.blockchain.clone()),
    ])
}

/// Decodes a stored timestamp: RFC 3339 string or integer nanoseconds.
fn decode_time(value: &Value) -> std::result::Result<DateTime<Utc>, QuotationError> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| QuotationError::Decode(format!("timestamp '{}': {}", s, e))),
        Value::Number(n) => n
            .as_i64()
            .map(DateTime::from_timestamp_nanos)
            .ok_or_else(|| QuotationError::Decode(format!("timestamp {}", n))),
        other => Err(QuotationError::Decode(format!("timestamp {:?}", other))),
    }
}

/// Decodes a stored price: JSON number or deferred-precision numeric string.
fn decode_price(value: &Value) -> std::result::Result<f64, QuotationError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| QuotationError::Decode(format!("price {}", n))),
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| QuotationError::Decode(format!("price '{}': {}", s, e))),
        other => Err(QuotationError::Decode(format!("price {:?}", other))),
    }
}

/// Price series over a schema-less point-store driver.
pub struct QuotationSeries {
    store: Arc<dyn PointStore>,
}

impl QuotationSeries {
    pub fn new(store: Arc<dyn PointStore>) -> Self {
        Self { store }
    }

    /// Appends one quotation to the series.
    pub async fn append(&self, quotation: &AssetQuotation) -> Result<()> {
        self.append_batch(std::slice::from_ref(quotation)).await
    }

    /// Appends a batch of quotations in one driver call.
    pub async fn append_batch(&self, quotations: &[AssetQuotation]) -> Result<()> {
        if quotations.is_empty() {
            return Ok(());
        }
        let points = quotations
            .iter()
            .map(|q| PricePoint {
                tags: tags_for(&q.asset),
                price: q.price,
                time: q.time,
            })
            .collect();
        self.store.write_points(points).await
    }

    /// The single most recent observation with `start < time <= end`.
    pub async fn latest_before(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AssetQuotation> {
        let rows = self
            .store
            .select_prices(&PointSelection {
                address: asset.address.clone(),
                blockchain: asset.blockchain.clone(),
                start: Some(start),
                end: Some(end),
                order: SortOrder::Descending,
                limit: Some(1),
            })
            .await?;

        self.decode_single(asset, rows)
    }

    /// Full history for `asset` with `start < time <= end`, descending by time.
    pub async fn range(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AssetQuotation>> {
        let rows = self
            .store
            .select_prices(&PointSelection {
                address: asset.address.clone(),
                blockchain: asset.blockchain.clone(),
                start: Some(start),
                end: Some(end),
                order: SortOrder::Descending,
                limit: None,
            })
            .await?;

        if rows.is_empty() {
            return Err(QuotationError::NoData.into());
        }

        rows.iter()
            .map(|row| self.decode_row(asset, row))
            .collect()
    }

    /// The earliest observation ever recorded for `asset`.
    pub async fn oldest(&self, asset: &Asset) -> Result<AssetQuotation> {
        let rows = self
            .store
            .select_prices(&PointSelection {
                address: asset.address.clone(),
                blockchain: asset.blockchain.clone(),
                start: None,
                end: None,
                order: SortOrder::Ascending,
                limit: Some(1),
            })
            .await?;

        self.decode_single(asset, rows)
    }

    fn decode_single(&self, asset: &Asset, rows: Vec<PointRow>) -> Result<AssetQuotation> {
        match rows.first() {
            Some(row) => self.decode_row(asset, row),
            None => Err(QuotationError::NoData.into()),
        }
    }

    fn decode_row(&self, asset: &Asset, row: &PointRow) -> Result<AssetQuotation> {
        let time = decode_time(&row.time).map_err(|e| {
            error!("decode series row for {}: {}", asset.symbol, e);
            e
        })?;
        let price = decode_price(&row.price).map_err(|e| {
            error!("decode series row for {}: {}", asset.symbol, e);
            e
        })?;

        Ok(AssetQuotation {
            asset: asset.clone(),
            price,
            time,
            source: DATA_SOURCE_INTERNAL.to_string(),
        })
    }
}
