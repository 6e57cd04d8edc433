//! Core analytics logic for chatstats.
//!
//! This module contains:
//! - [`analytics`] - The [`AnalyticsRecord`] report and its parts
//! - [`aggregate`] - Single-pass [`Aggregator`] building the report
//! - [`anonymize`] - Pseudonymization of participant names
//! - [`filter`] - Date window filtering
//! - [`output`] - Format writers (JSON, CSV)

pub mod aggregate;
pub mod analytics;
pub mod anonymize;
pub mod filter;
pub mod output;

pub use aggregate::{Aggregator, aggregate};
pub use analytics::{AnalyticsRecord, DateRange, Summary, TypeCounts, WeekdayCounts};
pub use anonymize::{NameGenerator, NameMap, anonymize, anonymize_with};
pub use filter::FilterConfig;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, write_json};
