//! Asset registry backed by the relational asset table.

pub mod model;
pub mod repository;

pub use model::AssetDB;
pub use repository::AssetRepository;
