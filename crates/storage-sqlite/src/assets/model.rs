//! Database model for assets.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pricebook_core::assets::Asset;

/// Database model for the asset registry table.
///
/// `decimals` is nullable: assets ingested from sources that do not report
/// precision carry `NULL`, and the historical tier refuses to serve their
/// quotes until the precision is backfilled.
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Serialize,
    Deserialize, Debug, Clone, Default,
)]
#[diesel(table_name = crate::schema::assets)]
#[diesel(primary_key(asset_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AssetDB {
    pub asset_id: String,
    pub symbol: String,
    pub name: String,
    pub address: String,
    pub blockchain: String,
    pub decimals: Option<i32>,
}

impl From<AssetDB> for Asset {
    fn from(db: AssetDB) -> Self {
        Self {
            symbol: db.symbol,
            name: db.name,
            address: db.address,
            blockchain: db.blockchain,
            decimals: db.decimals.unwrap_or(0) as u8,
        }
    }
}

impl AssetDB {
    /// Builds a registry row from a domain asset. The key is derived from the
    /// (blockchain, address) identity so re-registration is a stable upsert.
    pub fn from_domain(asset: &Asset) -> Self {
        Self {
            asset_id: asset_key(asset),
            symbol: asset.symbol.clone(),
            name: asset.name.clone(),
            address: asset.address.clone(),
            blockchain: asset.blockchain.clone(),
            decimals: Some(asset.decimals as i32),
        }
    }
}

/// Deterministic registry key for an asset identity.
pub fn asset_key(asset: &Asset) -> String {
    format!("{}-{}", asset.blockchain, asset.address)
}
