//! Pure text and markup transforms applied to raw page content.

use crate::error::ExtractError;
use crate::models::{ContactRecord, Coordinates, Locale, Overview, SpaceRecord};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};
use url::Url;

static DATA_LATITUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-latitude="(.*?)""#).expect("DATA_LATITUDE_RE should compile"));
static LAT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"lat="(.*?)""#).expect("LAT_RE should compile"));
static DATA_LONGITUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-longitude="(.*?)""#).expect("DATA_LONGITUDE_RE should compile"));
static LNG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"lng="(.*?)""#).expect("LNG_RE should compile"));

/// Table row holding a space's headers and values
pub const SPACE_ROW: &str = r#"div[class="row"]"#;

pub fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Normalize rendered text to one trimmed, non-empty line per text run.
///
/// Browsers pad block elements with blank lines and stray spaces; extractors
/// index lines by position, so those must go.
pub fn rendered_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Absolute URL of an iframe `src`, resolved against the page holding it
pub fn frame_url(base: &str, src: &str) -> Result<String, ExtractError> {
    let base = Url::parse(base).map_err(|e| ExtractError::Parse {
        field: "page url",
        reason: format!("`{base}`: {e}"),
    })?;
    let url = base.join(src).map_err(|e| ExtractError::Parse {
        field: "iframe src",
        reason: format!("`{src}`: {e}"),
    })?;

    Ok(url.into())
}

/// Split the title block into transaction type, address, building name and rate.
///
/// Line 0 is the transaction phrasing, line 1 is `address | building`, line 2
/// is the rate fragment.
pub fn parse_overview(text: &str) -> Result<Overview, ExtractError> {
    let lines: Vec<&str> = text.split('\n').collect();
    let line = |index: usize, field: &'static str| {
        lines
            .get(index)
            .copied()
            .ok_or(ExtractError::FieldNotFound { field })
    };

    let phrasing = line(0, "transaction_type")?;
    let location = line(1, "address")?;
    let rate = line(2, "sale_or_rent")?;

    // Only leases are relabelled; sale phrasing passes through as-is.
    let transaction_type = if phrasing.contains("lease") {
        "for rent".to_string()
    } else {
        phrasing.to_string()
    };

    let building_name = location.split('|').next().unwrap_or(location).trim().to_string();

    Ok(Overview {
        transaction_type,
        address: location.replace(" |", ","),
        building_name,
        sale_or_rent: format!("Lease Rate {rate}"),
    })
}

/// Value of the first line mentioning `label`.
///
/// The value is whatever follows the last `:` or newline, trimmed. A line
/// with no delimiter is returned whole.
pub fn find_labeled_value(lines: &[String], label: &str) -> Option<String> {
    let line = lines.iter().find(|line| line.contains(label))?;

    let is_delimiter = |c: char| c == ':' || c == '\n';
    if !line.contains(is_delimiter) {
        warn!("Line for `{}` has no delimiter, using it whole", label);
        return Some(line.trim().to_string());
    }

    let value = line.rsplit(is_delimiter).next().unwrap_or_default().trim();
    if value.to_lowercase().contains("available immediately") {
        return Some("available".to_string());
    }

    Some(value.to_string())
}

/// Format the digits of a phone line as `tel:+1(AAA)BBB-CCCC`.
///
/// Digit count is not validated; short or long numbers keep the same slicing.
pub fn format_phone(line: &str) -> String {
    let digits: String = line.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        warn!("Phone line `{}` has {} digits", line, digits.len());
    }

    let (area, rest) = digits.split_at(digits.len().min(3));
    let (exchange, subscriber) = rest.split_at(rest.len().min(3));
    format!("tel:+1({area}){exchange}-{subscriber}")
}

/// Build a contact from its text block: name first, then phone and email lines
pub fn parse_contact(block: &str) -> ContactRecord {
    let mut lines = block.split('\n');
    let name = lines.next().unwrap_or_default().to_string();

    let mut telephone = Vec::new();
    let mut email = None;

    for line in lines {
        if line.contains(':') {
            telephone.push(format_phone(line));
        }
        if line.contains('@') {
            email = Some(line.to_string());
        }
    }

    ContactRecord {
        name,
        telephone,
        email,
    }
}

/// Pull latitude and longitude out of the map container's markup
pub fn parse_coordinates(markup: &str) -> Result<Coordinates, ExtractError> {
    let latitude = first_capture(&[&*DATA_LATITUDE_RE, &*LAT_RE], markup)
        .ok_or(ExtractError::FieldNotFound { field: "latitude" })?;
    let longitude = first_capture(&[&*DATA_LONGITUDE_RE, &*LNG_RE], markup)
        .ok_or(ExtractError::FieldNotFound { field: "longitude" })?;

    Ok(Coordinates {
        latitude,
        longitude,
    })
}

/// First capture of the first pattern that matches
fn first_capture(patterns: &[&Regex], haystack: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        let value = re.captures(haystack)?.get(1)?.as_str().to_string();
        debug!("Matched coordinate pattern `{}`", re.as_str());
        Some(value)
    })
}

/// Split a `lang` attribute such as `en-US` into language and lower-case country
pub fn parse_locale(lang: &str) -> Result<Locale, ExtractError> {
    let mut parts = lang.split('-');
    let language = parts.next().unwrap_or_default().to_string();
    let country = parts.next().ok_or_else(|| ExtractError::Parse {
        field: "country",
        reason: format!("`{lang}` has no region part"),
    })?;

    Ok(Locale {
        country: country.to_lowercase(),
        language,
    })
}

/// Absolute URL of a document link given its outer markup
pub fn document_link(markup: &str, origin: &str) -> Result<String, ExtractError> {
    let fragment = Html::parse_fragment(markup);
    let href = fragment
        .select(&parse_selector("a")?)
        .next()
        .and_then(|link| link.value().attr("href"))
        .ok_or(ExtractError::FieldNotFound { field: "brochure_link" })?;

    Ok(format!("{origin}{href}"))
}

/// Build a space from a card's inner markup.
///
/// Headers and values are paired by position; only "Space Available" and
/// "Lease Rate" are kept.
pub fn parse_space_card(markup: &str) -> Result<SpaceRecord, ExtractError> {
    let fragment = Html::parse_fragment(markup);

    let title = fragment
        .select(&parse_selector("h5")?)
        .next()
        .map(cell_text);

    let row = fragment
        .select(&parse_selector(SPACE_ROW)?)
        .next()
        .ok_or_else(|| ExtractError::ElementNotFound {
            selector: SPACE_ROW.to_string(),
        })?;

    let headers: Vec<String> = row.select(&parse_selector("th")?).map(cell_text).collect();
    let values: Vec<String> = row.select(&parse_selector("td")?).map(cell_text).collect();

    if headers.len() != values.len() {
        return Err(ExtractError::ColumnMismatch {
            headers: headers.len(),
            values: values.len(),
        });
    }

    let mut space = SpaceRecord {
        title,
        ..Default::default()
    };

    for (header, value) in headers.into_iter().zip(values) {
        match header.as_str() {
            "Space Available" => space.size = Some(value),
            "Lease Rate" => space.rent = Some(value),
            _ => {}
        }
    }

    Ok(space)
}

fn cell_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
