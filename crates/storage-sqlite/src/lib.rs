//! SQLite storage implementation for Pricebook.
//!
//! This crate provides the relational historical tier and the asset registry
//! using Diesel ORM with SQLite. It implements the store traits defined in
//! `pricebook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The historical-quotation and asset-registry repositories
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place where Diesel dependencies exist. The core
//! crate is database-agnostic and works with traits.
//!
//! ```text
//! core (tier logic, services)
//!            │
//!            ▼
//!   storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod assets;
pub mod historical;

// Re-export database utilities
pub use db::{create_pool, get_connection, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from pricebook-core for convenience
pub use pricebook_core::errors::{DatabaseError, Error, Result};
