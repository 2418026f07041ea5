use serde::{Deserialize, Serialize};

use crate::quotations::AssetQuotation;

/// A quotation annotated with the 24h trading volume used to rank it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedQuotation {
    pub quotation: AssetQuotation,
    pub volume: f64,
}

/// Metric used to pick the top asset among records sharing a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopAssetMetric {
    Volume,
    MarketCap,
}
