//! One reader per page region. Each returns raw or lightly parsed values;
//! text parsing lives in [`normalize`](crate::scrapers::normalize).

use crate::models::{ContactRecord, Coordinates, Locale, Overview, SpaceRecord};
use crate::scrapers::normalize;
use crate::scrapers::traits::Renderer;
use crate::scrapers::types::Markup;
use anyhow::{Context, Result};
use tracing::debug;

/// Iframe embedding the listing; everything except the locale lives inside it
pub const LISTING_FRAME: &str = "#buildout > iframe";

const PAGE_ROOT: &str = "html";
const OVERVIEW: &str = "html > body > div:nth-of-type(3) > div:nth-of-type(5) > div > div";
const MAP: &str = "#map";
const DESCRIPTION: &str = "#overview > div > div:nth-of-type(1) > div:nth-of-type(3)";
const PROPERTY_DETAILS: &str = r#"div[class="summary-table-split-item pr-sm-3"]"#;
const CONTACTS: &str = r#"div[class="col-12 col-md-3"]"#;
const CONTACT: &str = r#"div[class="col-9 pl-3"]"#;
const DOCUMENTS: &str = "#documents";
const DOCUMENT_LINK: &str = r#"a[target="_blank"]"#;
const SPACES: &str = "#spaces";
const SPACE_CARD: &str = r#"div[class="card-body"]"#;

/// Country and language from the host page. Must run before entering the frame.
pub fn locale(page: &dyn Renderer) -> Result<Locale> {
    let lang = page
        .attribute(PAGE_ROOT, "lang")
        .context("Failed to read page language")?
        .unwrap_or_default();

    Ok(normalize::parse_locale(&lang)?)
}

pub fn overview(page: &dyn Renderer) -> Result<Overview> {
    let text = page.text(OVERVIEW).context("Failed to read overview block")?;
    Ok(normalize::parse_overview(&text)?)
}

pub fn coordinates(page: &dyn Renderer) -> Result<Coordinates> {
    let markup = page
        .markup(MAP, Markup::Outer)
        .context("Failed to read map block")?;
    Ok(normalize::parse_coordinates(&markup)?)
}

/// Paragraphs of the free-text description
pub fn description(page: &dyn Renderer) -> Result<Vec<String>> {
    page.texts(Some(DESCRIPTION), "p")
        .context("Failed to read description block")
}

/// Label/value cells of the property details grid, e.g. `"Property Type\nOffice"`
pub fn property_details(page: &dyn Renderer) -> Result<Vec<String>> {
    page.texts(None, PROPERTY_DETAILS)
        .context("Failed to read property details")
}

/// Raw text block of every broker
pub fn contacts(page: &dyn Renderer) -> Result<Vec<String>> {
    page.texts(Some(CONTACTS), CONTACT)
        .context("Failed to read contacts block")
}

pub fn contacts_filter(page: &dyn Renderer) -> Result<Vec<ContactRecord>> {
    let contacts: Vec<ContactRecord> = contacts(page)?
        .iter()
        .map(|block| normalize::parse_contact(block))
        .collect();

    debug!("Found {} contacts", contacts.len());
    Ok(contacts)
}

/// Absolute brochure URLs in page order
pub fn documents(page: &dyn Renderer, origin: &str) -> Result<Vec<String>> {
    let links = page
        .markups(Some(DOCUMENTS), DOCUMENT_LINK, Markup::Outer)
        .context("Failed to read documents block")?;

    let links = links
        .iter()
        .map(|link| normalize::document_link(link, origin))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Found {} documents", links.len());
    Ok(links)
}

pub fn spaces(page: &dyn Renderer) -> Result<Vec<SpaceRecord>> {
    let cards = page
        .markups(Some(SPACES), SPACE_CARD, Markup::Inner)
        .context("Failed to read spaces block")?;

    let spaces = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            normalize::parse_space_card(card).with_context(|| format!("Failed to parse space card {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Found {} spaces", spaces.len());
    Ok(spaces)
}
