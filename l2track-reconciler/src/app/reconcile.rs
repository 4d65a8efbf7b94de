//! The reconciliation run
//!
//! One pass over the source file: entries already present in the output
//! list are reused verbatim, everything else is resolved through the
//! collaborators. The full result is built, sorted and validated in
//! memory before a single byte is written, so any failure leaves the
//! previous output untouched. No retries; the run either completes or
//! aborts on the first error.

use std::path::Path;

use tracing::info;
use l2track_token_core::domain::entities::{BridgeType, SourceEntry, TokenEntry};

use crate::domain::collaborators::{PriceLookup, TokenMetadataSource};
use crate::domain::error::ReconcilerError;
use crate::infrastructure::config::{ChainSettings, Config};
use crate::infrastructure::logger::Logger;
use crate::infrastructure::storage::token_file::{
    load_source, load_token_list, save_token_list, TokenListFile,
};
use crate::validators::validate_token_list;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub reused: usize,
    pub fetched: usize,
}

pub struct Reconciler<'a> {
    config: &'a Config,
    chain_data: &'a dyn TokenMetadataSource,
    prices: &'a dyn PriceLookup,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        config: &'a Config,
        chain_data: &'a dyn TokenMetadataSource,
        prices: &'a dyn PriceLookup,
    ) -> Self {
        Self {
            config,
            chain_data,
            prices,
        }
    }

    pub async fn run(&self) -> Result<RunSummary, ReconcilerError> {
        // Both files must parse before any network activity happens
        Logger::loading("source file");
        let source = load_source(Path::new(&self.config.source_path))?;
        Logger::loaded("source file");

        Logger::loading("token list");
        let existing = load_token_list(Path::new(&self.config.output_path))?;
        Logger::loaded("token list");

        let mut result: Vec<TokenEntry> = Vec::new();
        let mut reused = 0usize;
        let mut fetched = 0usize;

        for (chain_name, entries) in &source.chains {
            let settings = self.config.chain(chain_name)?;
            info!("Processing chain {} ({})", chain_name, settings.chain_id);

            for entry in entries {
                let present = existing
                    .tokens
                    .iter()
                    .find(|token| token.matches(settings.chain_id, entry));

                if let Some(present) = present {
                    Logger::skipping(chain_name, &entry.symbol);
                    result.push(present.clone());
                    reused += 1;
                    continue;
                }

                Logger::fetching(chain_name, &entry.symbol);
                let token = self.resolve(settings, entry).await?;
                Logger::fetched(chain_name, &entry.symbol);
                result.push(token);
                fetched += 1;
            }
        }

        result.sort_by(TokenEntry::listing_order);
        info!("Sorted {} tokens", result.len());

        validate_token_list(&result, &self.config.known_bridges)?;

        let output = TokenListFile {
            comment: existing.comment,
            tokens: result,
        };
        save_token_list(Path::new(&self.config.output_path), &output)?;
        Logger::saved(&self.config.output_path);

        Ok(RunSummary {
            total: output.tokens.len(),
            reused,
            fetched,
        })
    }

    async fn resolve(
        &self,
        settings: &ChainSettings,
        entry: &SourceEntry,
    ) -> Result<TokenEntry, ReconcilerError> {
        match entry.address {
            Some(address) => {
                let metadata = self.chain_data.fetch_metadata(settings.chain_id, address).await?;
                let coingecko_id = self.prices.coingecko_id(address).await?;

                Ok(TokenEntry {
                    chain_id: settings.chain_id,
                    name: metadata.name,
                    symbol: metadata.symbol,
                    decimals: metadata.decimals,
                    address: Some(address),
                    category: entry.category,
                    bridge_type: entry.bridge_type,
                    bridged_using: entry.bridged_using.clone(),
                    coingecko_id,
                })
            }
            // Address-less entries are the chain's own gas asset; their
            // metadata comes from the chain registry, no call needed
            None => Ok(TokenEntry {
                chain_id: settings.chain_id,
                name: settings.native_name.clone(),
                symbol: entry.symbol.clone(),
                decimals: settings.native_decimals,
                address: None,
                category: entry.category,
                bridge_type: BridgeType::Native,
                bridged_using: None,
                coingecko_id: settings.native_coingecko_id.clone(),
            }),
        }
    }
}
