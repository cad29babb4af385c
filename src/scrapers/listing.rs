use crate::models::ListingRecord;
use crate::scrapers::extract;
use crate::scrapers::normalize::find_labeled_value;
use crate::scrapers::traits::Renderer;
use crate::scrapers::types::ScrapeConfig;
use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

/// Local time formatted the way records store it
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Scrape the configured listing into a record.
///
/// The locale is read from the host page first; every other region is read
/// from inside the embedded listing frame.
pub fn scrape_listing(page: &mut dyn Renderer, config: &ScrapeConfig) -> Result<ListingRecord> {
    page.open(&config.url)?;
    let scraped_at = timestamp();

    let locale = extract::locale(page)?;
    page.enter_frame(extract::LISTING_FRAME)
        .context("Failed to enter listing frame")?;

    let overview = extract::overview(page)?;
    let coordinates = extract::coordinates(page)?;
    let description = extract::description(page)?;
    let property_details = extract::property_details(page)?;
    let contacts = extract::contacts_filter(page)?;
    let brochure_link = extract::documents(page, &config.document_origin)?;
    let spaces = extract::spaces(page)?;

    let building_type = find_labeled_value(&property_details, "Property Type")
        .map(|kind| format!("{kind} Building"));
    let size = find_labeled_value(&property_details, "Size");
    let sale_stage = find_labeled_value(&description, "Lease Term");

    info!("Assembled listing for {}", overview.address);

    Ok(ListingRecord {
        scraped_at,
        address: overview.address,
        building_name: overview.building_name,
        latitude: coordinates.latitude,
        longitude: coordinates.longitude,
        url: config.url.clone(),
        transaction_type: overview.transaction_type,
        sale_stage,
        size,
        building_type,
        contacts,
        sale_or_rent: overview.sale_or_rent,
        brochure_link,
        spaces,
        country: locale.country,
        language: locale.language,
    })
}
