//! Core error types for the pricebook crates.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer.

use thiserror::Error;

use crate::aggregation::AggregationError;
use crate::quotations::QuotationError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the quotation store.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Quotation operation failed: {0}")]
    Quotation(#[from] QuotationError),

    #[error("Aggregation failed: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Asset registry lookup failed: {0}")]
    Registry(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// Uses `String` for all error details so the storage layer can convert
/// Diesel/SQLite errors into this format without leaking driver types.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal storage error.
    #[error("Internal storage error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the error means "nothing stored", as opposed to a failing tier.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Database(DatabaseError::NotFound(_)) => true,
            Error::Quotation(e) => e.is_not_found(),
            _ => false,
        }
    }
}
