//! TokenSwap Simulator
//!
//! Drives the swap form against a price feed with scripted scenarios.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tokenswap_form::SwapConfig;
use tokenswap_pricing::{FilePriceFeed, HttpPriceFeed, PriceFeed, PricingConfig, StaticPriceFeed};

mod controller;
mod metrics;
mod sample;
mod scenario;

use controller::SimulationController;
use scenario::Scenario;

/// TokenSwap Simulator CLI
#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "TokenSwap swap form simulation environment")]
struct Args {
    /// Price feed URL (overrides TOKEN_PRICE_URL)
    #[arg(long)]
    feed_url: Option<String>,

    /// Read prices from a JSON file instead of a URL
    #[arg(long, conflicts_with = "feed_url")]
    feed_file: Option<PathBuf>,

    /// Built-in scenario to run
    #[arg(short, long, default_value = "basic-swap")]
    scenario: String,

    /// Run a scenario from a JSON file instead
    #[arg(long)]
    scenario_file: Option<PathBuf>,

    /// Settle delay in milliseconds (overrides SWAP_SETTLE_DELAY_MS)
    #[arg(long)]
    settle_delay_ms: Option<u64>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter =
        tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    info!("Starting TokenSwap Simulator");

    let mut pricing = PricingConfig::from_env();
    if let Some(url) = &args.feed_url {
        pricing.price_url = Some(url.clone());
    }
    pricing.validate().map_err(anyhow::Error::msg)?;

    let mut swap = SwapConfig::from_env();
    if let Some(ms) = args.settle_delay_ms {
        swap.settle_delay = Duration::from_millis(ms);
    }
    swap.validate().map_err(anyhow::Error::msg)?;

    let feed: Arc<dyn PriceFeed> = if let Some(path) = &args.feed_file {
        Arc::new(FilePriceFeed::new(path))
    } else if pricing.price_url.is_some() {
        Arc::new(HttpPriceFeed::new(&pricing)?)
    } else {
        info!("No price feed configured, using built-in sample");
        Arc::new(StaticPriceFeed::from_json(sample::SAMPLE_FEED)?)
    };
    info!(feed = feed.name(), settle_delay_ms = swap.settle_delay.as_millis() as u64, "Configured");

    let scenario = match &args.scenario_file {
        Some(path) => Scenario::from_file(path)?,
        None => Scenario::load(&args.scenario)?,
    };

    let mut controller = SimulationController::new(feed, swap, pricing.icon_base_url.clone())?;
    controller.initialize().await?;
    controller.run_scenario(&scenario).await?;
    controller.stop();

    // Print metrics
    let metrics = controller.get_metrics();
    info!("Simulation complete");
    info!("Steps: {}", metrics.steps);
    info!("Currency changes: {}", metrics.currency_changes);
    info!("Amount edits: {}", metrics.amount_edits);
    info!(
        "Catalog refreshes: {} ({} failed)",
        metrics.catalog_refreshes, metrics.refresh_failures
    );
    info!(
        "Expectations: {} passed, {} failed",
        metrics.expectations_passed, metrics.expectations_failed
    );

    if !metrics.all_passed() {
        anyhow::bail!(
            "Scenario {} failed {} expectation(s)",
            scenario.name,
            metrics.expectations_failed
        );
    }

    Ok(())
}
