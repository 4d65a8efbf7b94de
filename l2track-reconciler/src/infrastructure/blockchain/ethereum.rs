//! ERC-20 metadata client
//!
//! One HTTP provider per configured chain. Metadata is read with raw
//! `eth_call`s against the standard `name()` / `symbol()` / `decimals()`
//! selectors rather than a typed contract binding, because a handful of
//! old tokens (MKR being the usual suspect) answer `name()` and
//! `symbol()` with a null-terminated `bytes32` instead of an ABI string
//! and need fallback decoding.

use std::collections::HashMap;

use async_trait::async_trait;
use ethers::abi::{self, ParamType, Token};
use ethers::providers::{Http, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Address, Bytes, TransactionRequest, U256};
use ethers::utils::id;
use l2track_token_core::domain::entities::TokenMetadata;

use crate::domain::collaborators::TokenMetadataSource;
use crate::domain::error::ReconcilerError;
use crate::infrastructure::config::Config;

pub struct EthereumMetadataClient {
    providers: HashMap<u64, Provider<Http>>,
}

impl EthereumMetadataClient {
    pub fn new(config: &Config) -> Result<Self, ReconcilerError> {
        let mut providers = HashMap::new();

        for (name, settings) in &config.chains {
            if let Some(url) = &settings.rpc_url {
                let provider = Provider::<Http>::try_from(url.as_str()).map_err(|e| {
                    ReconcilerError::configuration(format!(
                        "failed to create HTTP provider for chain {name}: {e}"
                    ))
                })?;
                providers.insert(settings.chain_id, provider);
            }
        }

        Ok(Self { providers })
    }

    fn provider(&self, chain_id: u64) -> Result<&Provider<Http>, ReconcilerError> {
        self.providers.get(&chain_id).ok_or_else(|| {
            ReconcilerError::configuration(format!(
                "no RPC endpoint configured for chain {chain_id}; set the matching *_RPC_URL variable"
            ))
        })
    }

    async fn call(
        &self,
        chain_id: u64,
        address: Address,
        signature: &str,
    ) -> Result<Bytes, ReconcilerError> {
        let provider = self.provider(chain_id)?;
        let selector = id(signature);

        let tx: TypedTransaction = TransactionRequest::new()
            .to(address)
            .data(selector.to_vec())
            .into();

        provider.call(&tx, None).await.map_err(|e| {
            ReconcilerError::collaborator(format!(
                "{signature} call on {address:?} (chain {chain_id}) failed: {e}"
            ))
        })
    }
}

#[async_trait]
impl TokenMetadataSource for EthereumMetadataClient {
    async fn fetch_metadata(
        &self,
        chain_id: u64,
        address: Address,
    ) -> Result<TokenMetadata, ReconcilerError> {
        let name = decode_string_result(&self.call(chain_id, address, "name()").await?)?;
        let symbol = decode_string_result(&self.call(chain_id, address, "symbol()").await?)?;
        let decimals = decode_decimals_result(&self.call(chain_id, address, "decimals()").await?)?;

        Ok(TokenMetadata {
            name,
            symbol,
            decimals,
        })
    }
}

/// Decodes a `string` call result, falling back to null-terminated
/// `bytes32` for legacy tokens.
fn decode_string_result(data: &[u8]) -> Result<String, ReconcilerError> {
    if data.is_empty() {
        return Err(ReconcilerError::collaborator(
            "empty call result; address is probably not a token contract".to_string(),
        ));
    }

    if let Ok(mut tokens) = abi::decode(&[ParamType::String], data) {
        if let Some(Token::String(value)) = tokens.pop() {
            if !value.is_empty() {
                return Ok(value);
            }
        }
    }

    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let text = std::str::from_utf8(&data[..end]).map_err(|_| {
        ReconcilerError::collaborator("string call result is neither ABI nor bytes32".to_string())
    })?;
    if text.is_empty() {
        return Err(ReconcilerError::collaborator(
            "string call result decoded to nothing".to_string(),
        ));
    }
    Ok(text.to_string())
}

/// Decodes a `uint8` call result.
fn decode_decimals_result(data: &[u8]) -> Result<u8, ReconcilerError> {
    let tokens = abi::decode(&[ParamType::Uint(8)], data).map_err(|e| {
        ReconcilerError::collaborator(format!("failed to decode decimals() result: {e}"))
    })?;

    match tokens.first() {
        Some(Token::Uint(value)) if *value <= U256::from(u8::MAX) => Ok(value.as_u64() as u8),
        _ => Err(ReconcilerError::collaborator(
            "decimals() result out of range".to_string(),
        )),
    }
}
