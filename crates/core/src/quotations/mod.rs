//! Quotation management module.
//!
//! This module provides the tiered read/write path for USD price quotations:
//!
//! - [`model`] - Domain models for quotations
//! - [`store`] - Capability traits for the backing tiers
//! - [`cache`] - TTL-bounded latest-value cache tier
//! - [`series`] - Append-only time-series tier
//! - [`memory`] - In-memory reference drivers
//! - [`service`] - Orchestration across the tiers
//!
//! # Architecture
//!
//! ```text
//! QuotationService ──writes──▶ QuotationSeries ──▶ PointStore (driver)
//!        │       └──writes──▶ QuotationCache  ──▶ KeyValueStore (driver)
//!        └──reads: cache first, series fallback
//!
//! HistoricalQuotationStore (relational tier) ──▶ storage-sqlite crate
//! ```
//!
//! Models and tier logic are driver-agnostic; swapping a network-backed
//! driver for the in-memory one changes nothing above the trait seam.

pub mod cache;
pub mod errors;
pub mod memory;
pub mod model;
pub mod series;
pub mod service;
pub mod store;


// Re-export commonly used types for convenience
pub use cache::QuotationCache;
pub use errors::QuotationError;
pub use model::{AssetQuotation, DATA_SOURCE_INTERNAL};
pub use series::QuotationSeries;
pub use service::{QuotationService, QuotationServiceTrait};
pub use store::{
    HistoricalQuotationStore, KeyValueStore, PointRow, PointSelection, PointStore, PricePoint,
    SortOrder, SupplyStore,
};
