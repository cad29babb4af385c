use crate::models::ListingRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use tracing::info;

/// Pretty-print a record with 4-space indentation
pub fn to_json(record: &ListingRecord) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    record
        .serialize(&mut serializer)
        .context("Failed to serialize listing")?;

    Ok(String::from_utf8(buf)?)
}

/// Write a record to `path`, replacing whatever was there
pub async fn write_record(path: &Path, record: &ListingRecord) -> Result<()> {
    let json = to_json(record)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("💾 Saved listing to {}", path.display());
    Ok(())
}
