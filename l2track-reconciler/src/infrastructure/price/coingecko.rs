//! Coingecko price-identifier client
//!
//! The full coin list is fetched once per run and indexed by Ethereum
//! platform address; lookups after that are in-memory. Without an API
//! key the client degrades to resolving nothing instead of aborting the
//! run.

use std::collections::HashMap;

use async_trait::async_trait;
use ethers::types::Address;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::domain::collaborators::PriceLookup;
use crate::domain::error::ReconcilerError;

const COIN_LIST_URL: &str = "https://pro-api.coingecko.com/api/v3/coins/list";
const API_KEY_HEADER: &str = "x-cg-pro-api-key";

#[derive(Debug, Deserialize)]
struct CoinListEntry {
    id: String,
    #[serde(default)]
    platforms: HashMap<String, Option<String>>,
}

pub struct CoingeckoClient {
    http: reqwest::Client,
    api_key: Option<String>,
    index: OnceCell<HashMap<Address, String>>,
}

impl CoingeckoClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            index: OnceCell::new(),
        }
    }

    async fn index(&self) -> Result<&HashMap<Address, String>, ReconcilerError> {
        self.index
            .get_or_try_init(|| async {
                // api_key presence is checked by the caller
                let key = self.api_key.as_deref().unwrap_or_default();
                let coins: Vec<CoinListEntry> = self
                    .http
                    .get(COIN_LIST_URL)
                    .query(&[("include_platform", "true")])
                    .header(API_KEY_HEADER, key)
                    .send()
                    .await
                    .map_err(|e| {
                        ReconcilerError::collaborator(format!("coin list request failed: {e}"))
                    })?
                    .error_for_status()
                    .map_err(|e| {
                        ReconcilerError::collaborator(format!("coin list request rejected: {e}"))
                    })?
                    .json()
                    .await
                    .map_err(|e| {
                        ReconcilerError::collaborator(format!("coin list response malformed: {e}"))
                    })?;

                debug!("Indexed {} coins from the price service", coins.len());
                Ok(build_index(coins))
            })
            .await
    }
}

#[async_trait]
impl PriceLookup for CoingeckoClient {
    async fn coingecko_id(&self, address: Address) -> Result<Option<String>, ReconcilerError> {
        if self.api_key.is_none() {
            // Degraded mode: the run proceeds without price identifiers
            return Ok(None);
        }
        Ok(self.index().await?.get(&address).cloned())
    }
}

fn build_index(coins: Vec<CoinListEntry>) -> HashMap<Address, String> {
    let mut index = HashMap::new();
    for coin in coins {
        let ethereum_address = coin
            .platforms
            .get("ethereum")
            .and_then(|raw| raw.as_deref())
            .and_then(|raw| raw.parse::<Address>().ok());
        if let Some(address) = ethereum_address {
            index.insert(address, coin.id);
        }
    }
    index
}
