use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use pricebook_core::assets::{Asset, AssetRegistry};
use pricebook_core::Result;

use super::model::AssetDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::assets;

/// Repository for the relational asset registry.
pub struct AssetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    /// Registers an asset, upserting on its (blockchain, address) identity.
    pub async fn register(&self, asset: &Asset) -> Result<()> {
        let row = AssetDB::from_domain(asset);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::replace_into(assets::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::QueryFailed)?;
                Ok(())
            })
            .await
    }

    fn get_by_symbol_impl(&self, symbol: &str) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let results = assets::table
            .select(AssetDB::as_select())
            .filter(assets::symbol.eq(symbol))
            .order(assets::asset_id.asc())
            .load::<AssetDB>(&mut conn)
            .map_err(StorageError::QueryFailed)?;

        Ok(results.into_iter().map(Asset::from).collect())
    }
}

#[async_trait]
impl AssetRegistry for AssetRepository {
    /// All registered asset records sharing `symbol`, in stable key order.
    /// An unknown symbol yields an empty list, not an error.
    async fn get_assets_by_symbol(&self, symbol: &str) -> Result<Vec<Asset>> {
        self.get_by_symbol_impl(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use tempfile::tempdir;

    async fn create_test_repository() -> (AssetRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (AssetRepository::new(Arc::clone(&pool), writer), temp_dir)
    }

    fn asset(symbol: &str, address: &str, blockchain: &str) -> Asset {
        Asset {
            symbol: symbol.to_string(),
            name: format!("{} token", symbol),
            address: address.to_string(),
            blockchain: blockchain.to_string(),
            decimals: 18,
        }
    }

    #[tokio::test]
    async fn test_register_and_lookup_by_symbol() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.register(&asset("ABC", "0x1", "Ethereum")).await.unwrap();
        repo.register(&asset("ABC", "0x2", "Polygon")).await.unwrap();
        repo.register(&asset("XYZ", "0x3", "Ethereum")).await.unwrap();

        let found = repo.get_assets_by_symbol("ABC").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|a| a.symbol == "ABC"));
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_empty_not_error() {
        let (repo, _temp_dir) = create_test_repository().await;
        let found = repo.get_assets_by_symbol("NONE").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_reregistration_updates_in_place() {
        let (repo, _temp_dir) = create_test_repository().await;
        repo.register(&asset("ABC", "0x1", "Ethereum")).await.unwrap();

        let mut updated = asset("ABC", "0x1", "Ethereum");
        updated.decimals = 6;
        repo.register(&updated).await.unwrap();

        let found = repo.get_assets_by_symbol("ABC").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].decimals, 6);
    }
}
