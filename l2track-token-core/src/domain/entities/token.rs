//! Token entities for the L2Track backend
//!
//! A [`TokenEntry`] is one resolved, persisted record describing a
//! tracked asset on one chain. A [`SourceEntry`] is a request to resolve
//! such a record; it only lives for the duration of one reconciliation
//! run.

use std::cmp::Ordering;

use ethers::types::Address;
use serde::{Deserialize, Serialize};

/// Asset category as listed in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Ether,
    Stablecoin,
    Other,
}

/// How the asset reaches the layer-2 network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeType {
    /// Escrowed in the rollup's own bridge contracts.
    #[default]
    Canonical,
    /// Minted by a third-party bridge; must name it via `bridged_using`.
    External,
    /// The chain's own gas asset, no bridge involved.
    Native,
}

/// Reference to the third-party bridge backing an external token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgedUsing {
    pub bridge: String,
    pub slug: String,
}

/// One tracked asset on one chain. Never mutated after creation within a
/// run; persisted by full-file overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenEntry {
    pub chain_id: u64,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub category: TokenCategory,
    pub bridge_type: BridgeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridged_using: Option<BridgedUsing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coingecko_id: Option<String>,
}

/// A resolution request from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceEntry {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub category: TokenCategory,
    #[serde(default)]
    pub bridge_type: BridgeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridged_using: Option<BridgedUsing>,
}

/// On-chain ERC-20 metadata as reported by the chain collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl TokenEntry {
    /// Whether this record already answers `source` on `chain_id`.
    ///
    /// Address takes priority over symbol: a candidate with an address
    /// only matches on that address, a candidate without one matches on
    /// symbol alone. Callers scan in list order, first match wins.
    pub fn matches(&self, chain_id: u64, source: &SourceEntry) -> bool {
        if self.chain_id != chain_id {
            return false;
        }
        match source.address {
            Some(wanted) => self.address == Some(wanted),
            None => self.symbol == source.symbol,
        }
    }

    /// Listing order of the persisted token list: chain id ascending,
    /// then address bytes ascending when both sides have one, otherwise
    /// symbol.
    pub fn listing_order(a: &TokenEntry, b: &TokenEntry) -> Ordering {
        a.chain_id.cmp(&b.chain_id).then_with(|| {
            match (&a.address, &b.address) {
                (Some(left), Some(right)) => left.as_bytes().cmp(right.as_bytes()),
                _ => a.symbol.cmp(&b.symbol),
            }
        })
    }
}
