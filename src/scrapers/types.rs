use std::path::PathBuf;
use std::time::Duration;

/// Listing scraped on every run
pub const LISTING_URL: &str = "https://bradvisors.com/listings/?propertyId=842304-lease";

/// Origin the embedded listing frame is served from; its document links are relative to it
pub const DOCUMENT_ORIGIN: &str = "https://buildout.com";

/// Settings for a single scrape run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Page to open
    pub url: String,
    /// File the record is written to, overwritten on each run
    pub output_path: PathBuf,
    /// Run Chrome without a window
    pub headless: bool,
    /// Pause after each navigation so scripts can finish rendering
    pub settle: Duration,
    /// Prefix for frame-relative document links
    pub document_origin: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: LISTING_URL.to_string(),
            output_path: PathBuf::from("output.json"),
            headless: true,
            settle: Duration::from_secs(2),
            document_origin: DOCUMENT_ORIGIN.to_string(),
        }
    }
}

/// Which serialization of an element to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Inner,
    Outer,
}

impl Markup {
    /// DOM property holding this serialization
    pub fn property(self) -> &'static str {
        match self {
            Markup::Inner => "innerHTML",
            Markup::Outer => "outerHTML",
        }
    }
}
