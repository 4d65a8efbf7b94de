//! Token list invariants
//!
//! Checked against the full in-memory result before anything is
//! written: addresses are unique per chain, symbols are unique per chain
//! among address-less entries, and external tokens name a known bridge.

use std::collections::HashSet;

use ethers::types::Address;
use l2track_token_core::domain::entities::{BridgeType, TokenEntry};

use crate::domain::error::ReconcilerError;

pub fn validate_token_list(
    tokens: &[TokenEntry],
    known_bridges: &[String],
) -> Result<(), ReconcilerError> {
    let mut seen_addresses: HashSet<(u64, Address)> = HashSet::new();
    let mut seen_symbols: HashSet<(u64, &str)> = HashSet::new();

    for token in tokens {
        match token.address {
            Some(address) => {
                if !seen_addresses.insert((token.chain_id, address)) {
                    return Err(ReconcilerError::source_data(format!(
                        "duplicate token address {address:?} on chain {}",
                        token.chain_id
                    )));
                }
            }
            None => {
                if !seen_symbols.insert((token.chain_id, token.symbol.as_str())) {
                    return Err(ReconcilerError::source_data(format!(
                        "duplicate address-less token symbol {} on chain {}",
                        token.symbol, token.chain_id
                    )));
                }
            }
        }

        if token.bridge_type == BridgeType::External {
            match &token.bridged_using {
                None => {
                    return Err(ReconcilerError::source_data(format!(
                        "external token {} on chain {} must declare its bridge",
                        token.symbol, token.chain_id
                    )));
                }
                Some(bridged) if !known_bridges.iter().any(|slug| slug == &bridged.slug) => {
                    return Err(ReconcilerError::source_data(format!(
                        "external token {} on chain {} names unknown bridge slug {}",
                        token.symbol, token.chain_id, bridged.slug
                    )));
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use l2track_token_core::domain::entities::{BridgedUsing, TokenCategory};

    fn token(chain_id: u64, symbol: &str, address: Option<&str>) -> TokenEntry {
        TokenEntry {
            chain_id,
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals: 18,
            address: address.map(|a| a.parse().unwrap()),
            category: TokenCategory::Other,
            bridge_type: BridgeType::Canonical,
            bridged_using: None,
            coingecko_id: None,
        }
    }

    const ADDR: &str = "0x0000000000000000000000000000000000000001";

    fn bridges() -> Vec<String> {
        vec!["hop".to_string(), "synapse".to_string()]
    }

    #[test]
    fn accepts_a_well_formed_list() {
        let tokens = vec![
            token(1, "DAI", Some(ADDR)),
            token(1, "ETH", None),
            token(10, "DAI", Some(ADDR)),
        ];
        assert!(validate_token_list(&tokens, &bridges()).is_ok());
    }

    #[test]
    fn rejects_duplicate_addresses_on_one_chain() {
        let tokens = vec![token(1, "DAI", Some(ADDR)), token(1, "SAI", Some(ADDR))];
        let result = validate_token_list(&tokens, &bridges());

        assert!(result.unwrap_err().to_string().contains("duplicate token address"));
    }

    #[test]
    fn rejects_duplicate_symbols_without_addresses() {
        let tokens = vec![token(1, "ETH", None), token(1, "ETH", None)];
        assert!(validate_token_list(&tokens, &bridges()).is_err());
    }

    #[test]
    fn rejects_external_tokens_without_a_bridge() {
        let mut external = token(10, "USDC", Some(ADDR));
        external.bridge_type = BridgeType::External;

        let result = validate_token_list(&[external], &bridges());
        assert!(result.unwrap_err().to_string().contains("must declare its bridge"));
    }

    #[test]
    fn rejects_unknown_bridge_slugs() {
        let mut external = token(10, "USDC", Some(ADDR));
        external.bridge_type = BridgeType::External;
        external.bridged_using = Some(BridgedUsing {
            bridge: "Some Bridge".to_string(),
            slug: "some-bridge".to_string(),
        });

        let result = validate_token_list(&[external], &bridges());
        assert!(result.unwrap_err().to_string().contains("unknown bridge slug"));
    }

    #[test]
    fn accepts_external_tokens_with_known_bridges() {
        let mut external = token(10, "USDC", Some(ADDR));
        external.bridge_type = BridgeType::External;
        external.bridged_using = Some(BridgedUsing {
            bridge: "Hop".to_string(),
            slug: "hop".to_string(),
        });

        assert!(validate_token_list(&[external], &bridges()).is_ok());
    }
}
