use colored::Colorize;

use l2track_reconciler::app::reconcile::Reconciler;
use l2track_reconciler::infrastructure::blockchain::ethereum::EthereumMetadataClient;
use l2track_reconciler::infrastructure::config::Config;
use l2track_reconciler::infrastructure::logger::Logger;
use l2track_reconciler::infrastructure::price::coingecko::CoingeckoClient;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    Logger::init("info");

    if let Err(e) = run().await {
        log::error!("Reconciliation failed: {e}");
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    log::info!("Starting token list reconciliation");

    let config = Config::from_env()?;
    if config.coingecko_api_key.is_some() {
        log::info!("Detected COINGECKO_API_KEY");
    } else {
        log::warn!("Missing COINGECKO_API_KEY; price identifiers will not be resolved");
    }

    let chain_data = EthereumMetadataClient::new(&config)?;
    let prices = CoingeckoClient::new(config.coingecko_api_key.clone());

    let summary = Reconciler::new(&config, &chain_data, &prices).run().await?;

    log::info!(
        "Reconciled {} tokens ({} reused, {} fetched)",
        summary.total,
        summary.reused,
        summary.fetched
    );
    Ok(())
}
