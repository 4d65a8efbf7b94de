//! Run configuration
//!
//! All environment access happens here, once, at process start. The
//! resulting [`Config`] is passed explicitly into the reconciliation
//! engine and the collaborators; nothing reads the environment mid-run.

use std::collections::HashMap;
use std::env;

use crate::domain::error::ReconcilerError;

const DEFAULT_SOURCE_PATH: &str = "./data/source.jsonc";
const DEFAULT_OUTPUT_PATH: &str = "./data/tokenList.json";

/// Bridges an `external` token may name in its `bridgedUsing` slug.
const DEFAULT_KNOWN_BRIDGES: &[&str] = &[
    "across",
    "celer",
    "hop",
    "multichain",
    "orbit",
    "synapse",
    "wormhole",
];

/// Per-chain settings, keyed in [`Config::chains`] by the chain name
/// used in the source file.
#[derive(Debug, Clone)]
pub struct ChainSettings {
    pub chain_id: u64,
    /// RPC endpoint; `None` until the matching `*_RPC_URL` variable is
    /// set. Only required once a token on this chain actually needs a
    /// fetch.
    pub rpc_url: Option<String>,
    pub native_name: String,
    pub native_symbol: String,
    pub native_decimals: u8,
    pub native_coingecko_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub coingecko_api_key: Option<String>,
    pub source_path: String,
    pub output_path: String,
    pub chains: HashMap<String, ChainSettings>,
    pub known_bridges: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ReconcilerError> {
        let config = Self {
            coingecko_api_key: Self::optional_env_var("COINGECKO_API_KEY"),
            source_path: Self::env_var_or("TOKEN_SOURCE_FILE", DEFAULT_SOURCE_PATH),
            output_path: Self::env_var_or("TOKEN_LIST_FILE", DEFAULT_OUTPUT_PATH),
            chains: Self::supported_chains(),
            known_bridges: Self::known_bridges(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Settings for a chain named in the source file. Unknown names are
    /// a source-data problem, not a configuration one.
    pub fn chain(&self, name: &str) -> Result<&ChainSettings, ReconcilerError> {
        self.chains.get(name).ok_or_else(|| {
            ReconcilerError::source_data(format!("unknown chain in source file: {name}"))
        })
    }

    /// Returns the value of an environment variable, falling back when
    /// it is unset or empty.
    pub fn env_var_or(key: &str, fallback: &str) -> String {
        match env::var(key) {
            Ok(value) if !value.is_empty() => value,
            _ => fallback.to_string(),
        }
    }

    /// Returns an optional environment variable; empty counts as unset.
    pub fn optional_env_var(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }

    fn supported_chains() -> HashMap<String, ChainSettings> {
        let mut chains = HashMap::new();

        for (name, chain_id) in [
            ("ethereum", 1u64),
            ("optimism", 10),
            ("base", 8453),
            ("arbitrum", 42161),
        ] {
            let rpc_key = format!("{}_RPC_URL", name.to_uppercase());
            chains.insert(
                name.to_string(),
                ChainSettings {
                    chain_id,
                    rpc_url: Self::optional_env_var(&rpc_key),
                    native_name: "Ether".to_string(),
                    native_symbol: "ETH".to_string(),
                    native_decimals: 18,
                    native_coingecko_id: Some("ethereum".to_string()),
                },
            );
        }

        chains
    }

    fn known_bridges() -> Vec<String> {
        match Self::optional_env_var("KNOWN_BRIDGES") {
            Some(raw) => raw
                .split(',')
                .map(|slug| slug.trim().to_string())
                .filter(|slug| !slug.is_empty())
                .collect(),
            None => DEFAULT_KNOWN_BRIDGES
                .iter()
                .map(|slug| slug.to_string())
                .collect(),
        }
    }

    fn validate(&self) -> Result<(), ReconcilerError> {
        if self.source_path.is_empty() {
            return Err(ReconcilerError::configuration(
                "TOKEN_SOURCE_FILE cannot be empty",
            ));
        }
        if self.output_path.is_empty() {
            return Err(ReconcilerError::configuration(
                "TOKEN_LIST_FILE cannot be empty",
            ));
        }

        for (name, settings) in &self.chains {
            if let Some(url) = &settings.rpc_url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ReconcilerError::configuration(format!(
                        "invalid RPC URL for chain {name}: '{url}'"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_or() {
        // Fallback when the variable does not exist
        assert_eq!(Config::env_var_or("L2TRACK_TEST_NONEXISTENT", "fallback"), "fallback");

        // Fallback when the variable is empty
        env::set_var("L2TRACK_TEST_EMPTY", "");
        assert_eq!(Config::env_var_or("L2TRACK_TEST_EMPTY", "fallback"), "fallback");

        // Actual value wins
        env::set_var("L2TRACK_TEST_SET", "value");
        assert_eq!(Config::env_var_or("L2TRACK_TEST_SET", "fallback"), "value");

        env::remove_var("L2TRACK_TEST_EMPTY");
        env::remove_var("L2TRACK_TEST_SET");
    }

    #[test]
    fn test_optional_env_var() {
        assert_eq!(Config::optional_env_var("L2TRACK_TEST_MISSING"), None);

        env::set_var("L2TRACK_TEST_BLANK", "");
        assert_eq!(Config::optional_env_var("L2TRACK_TEST_BLANK"), None);

        env::set_var("L2TRACK_TEST_KEY", "abc123");
        assert_eq!(
            Config::optional_env_var("L2TRACK_TEST_KEY"),
            Some("abc123".to_string())
        );

        env::remove_var("L2TRACK_TEST_BLANK");
        env::remove_var("L2TRACK_TEST_KEY");
    }

    #[test]
    fn test_supported_chains_have_expected_ids() {
        let chains = Config::supported_chains();

        assert_eq!(chains["ethereum"].chain_id, 1);
        assert_eq!(chains["optimism"].chain_id, 10);
        assert_eq!(chains["base"].chain_id, 8453);
        assert_eq!(chains["arbitrum"].chain_id, 42161);
        assert!(chains.values().all(|c| c.native_decimals == 18));
    }

    #[test]
    fn test_validate_rejects_malformed_rpc_url() {
        let mut config = Config {
            coingecko_api_key: None,
            source_path: "source.jsonc".to_string(),
            output_path: "tokenList.json".to_string(),
            chains: Config::supported_chains(),
            known_bridges: Vec::new(),
        };
        config
            .chains
            .get_mut("ethereum")
            .unwrap()
            .rpc_url = Some("not-a-url".to_string());

        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid RPC URL for chain ethereum"));
    }

    #[test]
    fn test_unknown_chain_is_a_source_data_error() {
        let config = Config {
            coingecko_api_key: None,
            source_path: "source.jsonc".to_string(),
            output_path: "tokenList.json".to_string(),
            chains: Config::supported_chains(),
            known_bridges: Vec::new(),
        };

        let result = config.chain("dogechain");
        assert!(matches!(result, Err(ReconcilerError::SourceData(_))));
    }
}
