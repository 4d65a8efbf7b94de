use std::sync::Once;

use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Console logger for the reconciliation run.
///
/// The per-step helpers mirror the rhythm a reconciliation run is read
/// by: load the files, then per entry either skip or fetch, then sort
/// and save.
pub struct Logger;

impl Logger {
    pub fn init(level: &str) {
        INIT.call_once(|| {
            let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
                format!("l2track_reconciler={level},l2track_token_core={level}")
            }));

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_timer(UtcTime::rfc_3339())
                .with_target(false)
                .init();
        });
    }

    pub fn loading(what: &str) {
        info!("Loading {}", what);
    }

    pub fn loaded(what: &str) {
        info!("Loaded {}", what);
    }

    pub fn skipping(chain: &str, symbol: &str) {
        info!("Skipping {} {}", chain, symbol);
    }

    pub fn fetching(chain: &str, symbol: &str) {
        info!("Fetching {} {}", chain, symbol);
    }

    pub fn fetched(chain: &str, symbol: &str) {
        info!("Fetched {} {}", chain, symbol);
    }

    pub fn saved(path: &str) {
        info!("Saved {}", path);
    }
}
