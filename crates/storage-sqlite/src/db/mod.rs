//! Database connection pooling, migrations, and the single-writer actor.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;
use std::sync::Arc;

use crate::errors::StorageError;
use pricebook_core::Result;

pub mod write_actor;

pub use write_actor::{spawn_writer, WriteHandle};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates an r2d2 connection pool for the SQLite database at `db_path`.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(8)
        .build(manager)
        .map_err(StorageError::PoolError)?;
    Ok(Arc::new(pool))
}

/// Checks a connection out of the pool.
pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection> {
    pool.get().map_err(|e| StorageError::PoolError(e).into())
}

/// Runs all pending embedded migrations and enables foreign key enforcement.
pub fn run_migrations(pool: &Arc<DbPool>) -> Result<()> {
    let mut conn = get_connection(pool)?;

    // Foreign key enforcement is per-connection in SQLite.
    sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(StorageError::QueryFailed)?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
    debug!("applied {} pending migrations", applied.len());
    Ok(())
}
