use serde::{Deserialize, Serialize};

/// One broker listed on the page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactRecord {
    pub name: String,
    pub telephone: Vec<String>,
    pub email: Option<String>,
}

/// One row of the available-spaces section
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpaceRecord {
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<String>,
}

/// Headline block of the listing
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub transaction_type: String,
    pub address: String,
    pub building_name: String,
    pub sale_or_rent: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

/// Country and language taken from the host page's `lang` attribute
#[derive(Debug, Clone, PartialEq)]
pub struct Locale {
    pub country: String,
    pub language: String,
}

/// The flat record written to disk for a scraped listing.
///
/// Field order is the key order of the emitted JSON. Every key is always
/// written; missing values serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingRecord {
    pub scraped_at: String,
    pub address: String,
    pub building_name: String,
    pub latitude: String,
    pub longitude: String,
    pub url: String,
    pub transaction_type: String,
    pub sale_stage: Option<String>,
    pub size: Option<String>,
    pub building_type: Option<String>,
    pub contacts: Vec<ContactRecord>,
    pub sale_or_rent: String,
    pub brochure_link: Vec<String>,
    pub spaces: Vec<SpaceRecord>,
    pub country: String,
    pub language: String,
}
