//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//!
//! The export language reuses [`Language`] through its `FromStr`
//! implementation, so `-l español` works as well as `-l es`.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{AnalyzerConfig, OutputConfig, ParserConfig};
use crate::core::filter::FilterConfig;
use crate::error::Result;
use crate::parser::Language;

/// Turn a WhatsApp chat export into activity statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats chat.txt
    chatstats chat.txt -l es --pretty -o stats.json
    chatstats chat.txt -f csv --after 2024-01-01
    chatstats chat.txt --anonymize --seed 42 -v")]
pub struct Args {
    /// Path to the transcript (.txt)
    pub input: String,

    /// Export language: es or en (default: detect both)
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<Language>,

    /// Output format (default: from the --output extension, else json)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Replace participant names with generated pseudonyms
    #[arg(long)]
    pub anonymize: bool,

    /// Seed for reproducible pseudonyms
    #[arg(long, value_name = "N", requires = "anonymize")]
    pub seed: Option<u64>,

    /// Only count messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only count messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Number of entries in most_active_days
    #[arg(long, value_name = "N", default_value_t = crate::config::DEFAULT_TOP_DAYS)]
    pub top_days: usize,

    /// Log progress and details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the parser configuration.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::new().with_language(self.language)
    }

    /// Builds the analyzer configuration, validating the date window.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`](crate::ChatstatsError::InvalidDate)
    /// for malformed `--after`/`--before` values.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(AnalyzerConfig::new()
            .with_top_days(self.top_days)
            .with_filter(filter))
    }

    /// Builds the output configuration.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new().with_pretty(self.pretty)
    }

    /// Resolves the report format: `--format`, then the `--output`
    /// extension, then JSON.
    pub fn output_format(&self) -> crate::format::OutputFormat {
        if let Some(format) = self.format {
            return format.into();
        }
        self.output
            .as_deref()
            .and_then(|path| crate::format::OutputFormat::from_path(path).ok())
            .unwrap_or_default()
    }
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - the full report (default)
/// - [`Csv`](OutputFormat::Csv) - per-participant table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full analytics record as JSON
    #[default]
    Json,

    /// Per-participant table, semicolon-delimited
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
        }
    }
}
