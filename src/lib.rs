//! # Chatstats
//!
//! A Rust library that turns WhatsApp chat exports into activity statistics.
//!
//! ## Overview
//!
//! A transcript goes through three stages:
//! - **Parsing** - locale-dependent line grammars are auto-detected and each
//!   logical message (including multi-line bodies) is recovered
//! - **Classification** - media placeholders such as `<image omitted>` or
//!   `imagen omitida` are recognized from a data-driven marker table
//! - **Aggregation** - one pass builds an [`AnalyticsRecord`] with per-year,
//!   per-month, per-hour, per-weekday and per-participant counts
//!
//! An optional pseudonymization step replaces every participant name with a
//! generated gaming-style alias before the report is shared.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let record = analyze_str(
//!         "2024-01-01, 10:00 - Alice: hello\n2024-01-01, 10:05 - Bob: <image omitted>",
//!         None,
//!     )?;
//!
//!     assert_eq!(record.summary.total_messages, 2);
//!     assert_eq!(record.message_types_per_participant["Bob"].image, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`analyze`] - End-to-end pipeline ([`analyze_str`], [`analyze_file`], [`Analysis`])
//! - [`parser`] - [`Parser`](parser::Parser) trait and [`Language`](parser::Language)
//! - [`parsers`] - [`WhatsAppParser`]
//! - [`parsing`] - Date grammars and line matching
//! - [`classify`] - [`MarkerTable`](classify::MarkerTable) and [`Classifier`](classify::Classifier)
//! - [`core`] - Aggregation, report types, pseudonymization, filtering, writers
//! - [`config`] - Configuration types
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`error`] - Unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod analyze;
pub mod classify;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsers;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use analyze::{Analysis, analyze_file, analyze_str};
pub use crate::core::analytics::AnalyticsRecord;
pub use error::{ChatstatsError, Result};
pub use message::{Message, MessageType};
pub use parsers::WhatsAppParser;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Message, MessageType};

    pub use crate::error::{ChatstatsError, Result};

    pub use crate::analyze::{Analysis, analyze_file, analyze_str};
    pub use crate::parser::{Language, Parser, create_parser};
    pub use crate::parsers::WhatsAppParser;
    pub use crate::parsing::DateFormat;
    pub use crate::classify::{Classifier, MarkerTable};

    pub use crate::config::{AnalyzerConfig, AnonymizeConfig, OutputConfig, ParserConfig};

    pub use crate::core::aggregate::{Aggregator, aggregate};
    pub use crate::core::analytics::{AnalyticsRecord, Summary, TypeCounts, WeekdayCounts};
    pub use crate::core::anonymize::{NameGenerator, NameMap, anonymize, anonymize_with};
    pub use crate::core::filter::FilterConfig;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, write_json};

    pub use crate::format::OutputFormat;
}
