//! Database model for historical quotations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One deduplicated price observation. The composite primary key
/// (asset_id, quote_time, source) is the natural dedup key; a conflicting
/// insert is dropped rather than rejected.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::historical_quotations)]
#[diesel(primary_key(asset_id, quote_time, source))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoricalQuotationDB {
    pub asset_id: String,
    pub price: f64,
    pub quote_time: NaiveDateTime,
    pub source: String,
}
