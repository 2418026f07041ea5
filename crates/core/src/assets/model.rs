//! Asset domain model.

use serde::{Deserialize, Serialize};

/// A uniquely identified tradable instrument.
///
/// Identity is the pair `(blockchain, address)`; `symbol` is ambiguous across
/// chains and only resolved to concrete assets through the registry.
/// Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub symbol: String,
    pub name: String,
    /// Contract address, or the chain's native-asset address.
    pub address: String,
    pub blockchain: String,
    /// Decimal precision of on-chain amounts.
    pub decimals: u8,
}

impl Asset {
    /// A malformed reference is rejected before any tier call.
    pub fn is_valid(&self) -> bool {
        !self.address.is_empty() && !self.blockchain.is_empty()
    }
}
