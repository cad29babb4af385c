mod error;
mod models;
mod output;
mod scrapers;

use anyhow::Context;
use scrapers::{scrape_listing, ChromeRenderer, ScrapeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("🏢 Listing Scout - commercial listing scraper");

    let config = ScrapeConfig::default();

    // Chrome is driven synchronously; the renderer is dropped (and the
    // browser shut down) before the task returns, on success or failure.
    let scrape_config = config.clone();
    let record = tokio::task::spawn_blocking(move || -> anyhow::Result<models::ListingRecord> {
        let mut renderer = ChromeRenderer::launch(&scrape_config)?;
        scrape_listing(&mut renderer, &scrape_config)
    })
    .await
    .context("Scrape task panicked")??;

    info!(
        "✅ Scraped {} ({} contacts, {} documents, {} spaces)",
        record.address,
        record.contacts.len(),
        record.brochure_link.len(),
        record.spaces.len()
    );

    output::write_record(&config.output_path, &record).await?;

    Ok(())
}
