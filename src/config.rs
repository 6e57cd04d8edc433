//! Configuration types for parsing, analysis, pseudonymization and output.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - language hint, date grammar and media markers
//! - [`AnalyzerConfig`] - date window and top-N size for the aggregator
//! - [`AnonymizeConfig`] - retry budget of the pseudonym generator
//! - [`OutputConfig`] - JSON/CSV rendering options
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{AnalyzerConfig, ParserConfig};
//! use chatstats::parser::Language;
//! use chatstats::parsing::DateFormat;
//!
//! let parser = ParserConfig::new()
//!     .with_language(Some(Language::Spanish))
//!     .with_date_format(DateFormat::DayFirstBracketed);
//!
//! let analyzer = AnalyzerConfig::new().with_top_days(5);
//! assert_eq!(analyzer.top_days, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::classify::MarkerTable;
use crate::core::filter::FilterConfig;
use crate::parser::Language;
use crate::parsing::DateFormat;

/// Default length of the `most_active_days` ranking.
pub const DEFAULT_TOP_DAYS: usize = 10;

/// Default number of pseudonym draws before falling back to a numeric suffix.
pub const DEFAULT_RETRY_BUDGET: usize = 32;

/// Configuration for transcript parsing and classification.
///
/// Both the date grammar and the marker vocabulary are data: leaving them
/// unset selects auto-detection and the built-in table for the language.
///
/// # Example
///
/// ```rust
/// use chatstats::classify::MarkerTable;
/// use chatstats::config::ParserConfig;
/// use chatstats::MessageType;
///
/// let markers = MarkerTable::new().with_marker(MessageType::Image, "foto omessa");
/// let config = ParserConfig::new().with_markers(markers);
/// assert_eq!(config.markers().match_media("foto omessa"), Some(MessageType::Image));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Export language hint (default: none, both built-in vocabularies apply)
    pub language: Option<Language>,

    /// Fixed date grammar (default: auto-detect)
    pub date_format: Option<DateFormat>,

    /// Custom marker table (default: built-in table for `language`)
    pub markers: Option<MarkerTable>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            language: None,
            date_format: None,
            markers: None,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the language hint.
    #[must_use]
    pub fn with_language(mut self, language: Option<Language>) -> Self {
        self.language = language;
        self
    }

    /// Fixes the date grammar instead of auto-detecting it.
    #[must_use]
    pub fn with_date_format(mut self, format: DateFormat) -> Self {
        self.date_format = Some(format);
        self
    }

    /// Replaces the built-in marker table.
    #[must_use]
    pub fn with_markers(mut self, markers: MarkerTable) -> Self {
        self.markers = Some(markers);
        self
    }

    /// Returns the marker table in effect.
    pub fn markers(&self) -> MarkerTable {
        self.markers
            .clone()
            .unwrap_or_else(|| MarkerTable::for_language(self.language))
    }
}

/// Configuration for the aggregation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Length of the `most_active_days` ranking (default: 10)
    pub top_days: usize,

    /// Date window; messages outside it are ignored (default: everything)
    #[serde(default)]
    pub filter: FilterConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_days: DEFAULT_TOP_DAYS,
            filter: FilterConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the length of the `most_active_days` ranking.
    #[must_use]
    pub fn with_top_days(mut self, top_days: usize) -> Self {
        self.top_days = top_days;
        self
    }

    /// Restricts analysis to a date window.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}

/// Configuration for the pseudonymization transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizeConfig {
    /// Random draws per participant before a numeric suffix is appended (default: 32)
    pub retry_budget: usize,
}

impl Default for AnonymizeConfig {
    fn default() -> Self {
        Self {
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

impl AnonymizeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retry budget. A budget of zero is treated as one draw.
    #[must_use]
    pub fn with_retry_budget(mut self, budget: usize) -> Self {
        self.retry_budget = budget;
        self
    }
}

/// Rendering options for report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Indent JSON output (default: false)
    pub pretty: bool,

    /// CSV field delimiter (default: `;`)
    pub csv_delimiter: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            csv_delimiter: b';',
        }
    }
}

impl OutputConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables indented JSON.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the CSV delimiter.
    #[must_use]
    pub fn with_csv_delimiter(mut self, delimiter: u8) -> Self {
        self.csv_delimiter = delimiter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessageType;

    #[test]
    fn test_parser_config_defaults() {
        let config = ParserConfig::default();
        assert!(config.language.is_none());
        assert!(config.date_format.is_none());
        assert!(config.markers.is_none());
    }

    #[test]
    fn test_parser_config_markers_follow_language() {
        let es = ParserConfig::new().with_language(Some(Language::Spanish));
        assert_eq!(es.markers().match_media("imagen omitida"), Some(MessageType::Image));
        assert_eq!(es.markers().match_media("image omitted"), None);

        let any = ParserConfig::new();
        assert_eq!(any.markers().match_media("image omitted"), Some(MessageType::Image));
        assert_eq!(any.markers().match_media("imagen omitida"), Some(MessageType::Image));
    }

    #[test]
    fn test_analyzer_config_builder() {
        let config = AnalyzerConfig::new().with_top_days(3);
        assert_eq!(config.top_days, 3);
        assert!(!config.filter.is_active());
    }

    #[test]
    fn test_anonymize_config_builder() {
        assert_eq!(AnonymizeConfig::default().retry_budget, DEFAULT_RETRY_BUDGET);
        assert_eq!(AnonymizeConfig::new().with_retry_budget(4).retry_budget, 4);
    }

    #[test]
    fn test_output_config_builder() {
        let config = OutputConfig::new().with_pretty(true).with_csv_delimiter(b',');
        assert!(config.pretty);
        assert_eq!(config.csv_delimiter, b',');
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = ParserConfig::new()
            .with_language(Some(Language::English))
            .with_date_format(DateFormat::UsBracketed);
        let json = serde_json::to_string(&config).unwrap();
        let back: ParserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.language, Some(Language::English));
        assert_eq!(back.date_format, Some(DateFormat::UsBracketed));
    }
}
