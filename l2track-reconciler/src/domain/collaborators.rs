//! External service boundaries
//!
//! The reconciliation engine only talks to the outside world through
//! these two traits. The real implementations live under
//! `infrastructure`; tests substitute canned ones.

use async_trait::async_trait;
use ethers::types::Address;
use l2track_token_core::domain::entities::TokenMetadata;

use crate::domain::error::ReconcilerError;

/// Resolves on-chain ERC-20 metadata for a token address.
#[async_trait]
pub trait TokenMetadataSource: Send + Sync {
    async fn fetch_metadata(
        &self,
        chain_id: u64,
        address: Address,
    ) -> Result<TokenMetadata, ReconcilerError>;
}

/// Resolves the price-service identifier for a token address, or
/// reports that none is known.
#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn coingecko_id(&self, address: Address) -> Result<Option<String>, ReconcilerError>;
}
