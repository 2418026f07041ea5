//! Relational historical tier: deduplicated price observations per asset.

pub mod model;
pub mod repository;

pub use model::HistoricalQuotationDB;
pub use repository::HistoricalQuotationRepository;
