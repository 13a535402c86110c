/// CSV line rendering and depth options.
pub mod csv;
/// EEML document building helpers.
pub mod xml;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};

/// Default JSON representation version.
pub const JSON_DEFAULT_VERSION: &str = "1.0.0";
/// Legacy JSON representation version.
pub const JSON_LEGACY_VERSION: &str = "0.6-alpha";
/// Default EEML representation version.
pub const XML_DEFAULT_VERSION: &str = "0.5.1";
/// Legacy EEML representation version.
pub const XML_LEGACY_VERSION: &str = "5";

/// Render a timestamp with 6-digit fractional seconds, the wire default.
pub(crate) fn iso8601_micros(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Render a timestamp at second precision, used only where a version
/// explicitly calls for it.
pub(crate) fn iso8601_seconds(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| Error::malformed_input(format!("invalid timestamp {text:?}: {e}")))
}

/// Explode a comma-joined tags string into the rendered sequence:
/// trimmed, case-insensitively sorted ascending, case-insensitively deduped.
pub(crate) fn sorted_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();
    tags.sort_by_key(|tag| tag.to_lowercase());
    tags.dedup_by(|a, b| a.to_lowercase() == b.to_lowercase());
    tags
}
