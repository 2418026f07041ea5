//! Asset registry lookup trait.

use async_trait::async_trait;

use super::model::Asset;
use crate::errors::Result;

/// Lookup interface into the external asset registry.
///
/// A symbol can resolve to several asset records (the same ticker issued on
/// multiple chains); callers that need a single asset disambiguate through
/// the aggregation service.
#[async_trait]
pub trait AssetRegistry: Send + Sync {
    /// Returns all asset records sharing `symbol`, in registry order.
    ///
    /// An unknown symbol yields an empty vector, not an error.
    async fn get_assets_by_symbol(&self, symbol: &str) -> Result<Vec<Asset>>;
}
