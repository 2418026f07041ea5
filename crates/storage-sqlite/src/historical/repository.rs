use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use pricebook_core::assets::Asset;
use pricebook_core::quotations::{AssetQuotation, HistoricalQuotationStore, QuotationError};
use pricebook_core::Result;

use super::model::HistoricalQuotationDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{assets, historical_quotations};

/// Repository for the historical-quotation table.
///
/// Rows reference the asset registry by key; reads resolve each asset's
/// decimal precision through the join.
pub struct HistoricalQuotationRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl HistoricalQuotationRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl HistoricalQuotationStore for HistoricalQuotationRepository {
    async fn insert(&self, quotation: &AssetQuotation) -> Result<()> {
        let address = quotation.asset.address.clone();
        let blockchain = quotation.asset.blockchain.clone();
        let price = quotation.price;
        let quote_time = quotation.time.naive_utc();
        let source = quotation.source.clone();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                // The asset must already be registered; a quote without a
                // registry row has no precision to resolve on read.
                let asset_id = assets::table
                    .filter(assets::address.eq(&address))
                    .filter(assets::blockchain.eq(&blockchain))
                    .select(assets::asset_id)
                    .first::<String>(conn)
                    .map_err(StorageError::QueryFailed)?;

                diesel::insert_into(historical_quotations::table)
                    .values(&HistoricalQuotationDB {
                        asset_id,
                        price,
                        quote_time,
                        source,
                    })
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .map_err(StorageError::QueryFailed)?;
                Ok(())
            })
            .await
    }

    async fn query_range(
        &self,
        asset: &Asset,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<AssetQuotation>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = historical_quotations::table
            .inner_join(assets::table)
            .filter(assets::address.eq(&asset.address))
            .filter(assets::blockchain.eq(&asset.blockchain))
            .filter(historical_quotations::quote_time.gt(start.naive_utc()))
            .filter(historical_quotations::quote_time.lt(end.naive_utc()))
            .order(historical_quotations::quote_time.asc())
            .select((
                historical_quotations::price,
                historical_quotations::quote_time,
                historical_quotations::source,
                assets::decimals,
            ))
            .load::<(f64, NaiveDateTime, String, Option<i32>)>(&mut conn)
            .map_err(StorageError::QueryFailed)?;

        rows.into_iter()
            .map(|(price, quote_time, source, decimals)| {
                let decimals = decimals.ok_or_else(|| {
                    QuotationError::UnresolvedPrecision(format!(
                        "{} on {}",
                        asset.address, asset.blockchain
                    ))
                })?;
                Ok(AssetQuotation {
                    asset: Asset {
                        decimals: decimals as u8,
                        ..asset.clone()
                    },
                    price,
                    time: Utc.from_utc_datetime(&quote_time),
                    source,
                })
            })
            .collect()
    }

    async fn last_timestamp(&self, asset: &Asset) -> Result<Option<DateTime<Utc>>> {
        let mut conn = get_connection(&self.pool)?;

        let result = historical_quotations::table
            .inner_join(assets::table)
            .filter(assets::address.eq(&asset.address))
            .filter(assets::blockchain.eq(&asset.blockchain))
            .order(historical_quotations::quote_time.desc())
            .select(historical_quotations::quote_time)
            .first::<NaiveDateTime>(&mut conn)
            .optional()
            .map_err(StorageError::QueryFailed)?;

        Ok(result.map(|t| Utc.from_utc_datetime(&t)))
    }
}
