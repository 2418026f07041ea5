//! Asset identity and registry lookup.
//!
//! Assets are owned by an external registry; this crate only references them
//! by value and never mutates them.

pub mod model;
pub mod registry;

pub use model::Asset;
pub use registry::AssetRegistry;
