//! Error handling for the reconciliation run
//!
//! Every variant is fatal: the run either completes and persists the
//! full list, or aborts leaving the previous output untouched. There are
//! no retries; re-running the tool is idempotent and cheap.

use thiserror::Error;

/// Reconciler error type
#[derive(Error, Debug)]
pub enum ReconcilerError {
    /// The source or existing-output file failed schema validation.
    /// Detected before any network activity.
    #[error("Source data error: {0}")]
    SourceData(String),

    /// A required credential or endpoint is missing. Raised when first
    /// needed, not at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A chain or price service call failed.
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// Writing the reconciled list failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ReconcilerError {
    /// Create a source data error
    pub fn source_data(message: impl Into<String>) -> Self {
        Self::SourceData(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<reqwest::Error> for ReconcilerError {
    fn from(err: reqwest::Error) -> Self {
        Self::collaborator(format!("HTTP error: {err}"))
    }
}

impl From<ethers::providers::ProviderError> for ReconcilerError {
    fn from(err: ethers::providers::ProviderError) -> Self {
        Self::collaborator(format!("RPC error: {err}"))
    }
}
