//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::OutputConfig;
use crate::core::analytics::AnalyticsRecord;
use crate::error::Result;

/// Writes a record to a JSON file.
///
/// The file holds a single JSON object whose shape is described in
/// [`analytics`](crate::core::analytics).
pub fn write_json(
    record: &AnalyticsRecord,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(record, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts a record to a JSON string.
///
/// Compact by default, indented when [`OutputConfig::pretty`] is set.
pub fn to_json(record: &AnalyticsRecord, config: &OutputConfig) -> Result<String> {
    let json = if config.pretty {
        serde_json::to_string_pretty(record)?
    } else {
        serde_json::to_string(record)?
    };
    Ok(json)
}
