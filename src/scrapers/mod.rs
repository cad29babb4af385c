pub mod browser;
pub mod extract;
pub mod listing;
pub mod normalize;
#[cfg(test)]
pub mod snapshot;
pub mod traits;
pub mod types;

pub use browser::ChromeRenderer;
pub use listing::scrape_listing;
pub use types::ScrapeConfig;
