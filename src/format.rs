//! Output format selection.
//!
//! Library-level format type without CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::analyze_str;
//! use chatstats::config::OutputConfig;
//! use chatstats::format::{OutputFormat, to_format_string};
//!
//! let record = analyze_str("2024-01-01, 10:00 - Alice: hello", None)?;
//!
//! let format = OutputFormat::from_path("stats.csv")?;
//! let table = to_format_string(&record, format, &OutputConfig::new())?;
//! assert!(table.starts_with("participant;"));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::OutputConfig;
use crate::core::analytics::AnalyticsRecord;
use crate::error::ChatstatsError;

/// Rendering of an analytics report.
///
/// - [`Json`](OutputFormat::Json) - the complete record (default)
/// - [`Csv`](OutputFormat::Csv) - the per-participant table only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Csv]
    }

    /// Picks the format matching a report path's extension (case-insensitive).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatstats::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/stats.CSV").unwrap(), OutputFormat::Csv);
    /// assert!(OutputFormat::from_path("stats.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatstatsError> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::all()
            .iter()
            .copied()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
            .ok_or_else(|| {
                ChatstatsError::invalid_format(
                    "output",
                    format!("cannot tell the report format of {}", path.display()),
                )
            })
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ChatstatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ChatstatsError::invalid_format("output", format!("unknown format '{s}', expected json or csv"))
            })
    }
}

fn feature_disabled(format: OutputFormat) -> ChatstatsError {
    let feature = match format {
        OutputFormat::Json => "json-output",
        OutputFormat::Csv => "csv-output",
    };
    ChatstatsError::invalid_format(
        "output",
        format!("Output format {format} requires the '{feature}' feature to be enabled"),
    )
}

/// Writes a record to a file in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file cannot be written
#[allow(unused_variables)]
pub fn write_to_format(
    record: &AnalyticsRecord,
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<(), ChatstatsError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(record, path, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(record, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

/// Converts a record to a string in the specified format.
///
/// # Errors
///
/// Returns an error if the required feature for the format is not enabled.
#[allow(unused_variables)]
pub fn to_format_string(
    record: &AnalyticsRecord,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, ChatstatsError> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(record, config),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(record, config),
        #[allow(unreachable_patterns)]
        _ => Err(feature_disabled(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("jsonl").unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_format_display_and_extension() {
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("a.json").unwrap(), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from_path("/tmp/dir.v2/report.Csv").unwrap(),
            OutputFormat::Csv
        );
        let err = OutputFormat::from_path("noext").unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_format_default_and_all() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        assert_eq!(OutputFormat::all().len(), 2);
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Csv).unwrap(), "\"csv\"");
        let parsed: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_to_format_string_dispatch() {
        let record = crate::analyze_str("2024-01-01, 10:00 - Alice: hello", None).unwrap();
        let config = OutputConfig::new();
        let json = to_format_string(&record, OutputFormat::Json, &config).unwrap();
        assert!(json.starts_with('{'));
        let csv = to_format_string(&record, OutputFormat::Csv, &config).unwrap();
        assert!(csv.starts_with("participant;"));
    }
}
