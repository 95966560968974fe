//! CLI presentation: json and yaml formatters for state output.

use crate::error::ApiError;
use crate::store::{insert_printable, printable_bytes, StateData};
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Serialization requested with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(ApiError::InvalidFormat(other.to_string())),
        }
    }
}

/// Serialize `value` in `format`, always ending in a newline
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, ApiError> {
    let mut out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))?,
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))?,
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Raw buckets with names and values in printable form
///
/// Non-UTF-8 bytes are shown as `0x`-prefixed hex. Two stored names that
/// would print the same are an error rather than a silently merged entry.
pub fn format_state_data(data: &StateData, format: OutputFormat) -> Result<String, ApiError> {
    let mut printable: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for (bucket, keys) in data {
        let mut entries = BTreeMap::new();
        for (key, value) in keys {
            insert_printable(&mut entries, key, printable_bytes(value))?;
        }
        insert_printable(&mut printable, bucket, entries)?;
    }
    render(&printable, format)
}

/// Decoded dump of the well-known buckets
pub fn format_state_dump(
    dump: &BTreeMap<String, BTreeMap<String, serde_json::Value>>,
    format: OutputFormat,
) -> Result<String, ApiError> {
    render(dump, format)
}
