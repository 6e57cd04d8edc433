//! Report writers.
//!
//! - [`write_json`] / [`to_json`] - the full record as one JSON object - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - per-participant table with semicolon delimiter - requires `csv-output` feature
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::analyze_file;
//! use chatstats::config::OutputConfig;
//! use chatstats::core::output::{to_csv, write_json};
//!
//! let record = analyze_file("chat.txt", None)?;
//!
//! write_json(&record, "stats.json", &OutputConfig::new().with_pretty(true))?;
//! let table = to_csv(&record, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
