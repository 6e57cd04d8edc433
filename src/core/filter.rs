//! Restrict analysis to a date window.
//!
//! [`FilterConfig`] defines the window. The
//! [`Aggregator`](crate::core::Aggregator) checks every message against it
//! with [`FilterConfig::matches`] while counting.
//!
//! # Examples
//!
//! ```
//! use chatstats::core::filter::FilterConfig;
//! use chatstats::Message;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatstats::Result<()> {
//! let at = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new(at(2024, 1, 1), "Alice", "Old"),
//!     Message::new(at(2024, 6, 15), "Alice", "New"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_date_to("2024-12-31")?;
//!
//! assert!(!config.matches(&messages[0]));
//! assert!(config.matches(&messages[1]));
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Both bounds are inclusive whole days
//! - System notices are filtered like any other message

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::{ChatstatsError, Result};

/// Inclusive date window.
///
/// # Examples
///
/// ```
/// use chatstats::core::filter::FilterConfig;
///
/// # fn main() -> chatstats::Result<()> {
/// let year_2024 = FilterConfig::new()
///     .with_date_from("2024-01-01")?
///     .with_date_to("2024-12-31")?;
/// assert!(year_2024.is_active());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Include only messages on or after this day.
    pub after: Option<NaiveDate>,

    /// Include only messages on or before this day.
    pub before: Option<NaiveDate>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_day(date_str)?);
        Ok(self)
    }

    /// Sets the end date (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.before = Some(parse_day(date_str)?);
        Ok(self)
    }

    /// Sets the start day directly.
    #[must_use]
    pub fn with_after(mut self, day: NaiveDate) -> Self {
        self.after = Some(day);
        self
    }

    /// Sets the end day directly.
    #[must_use]
    pub fn with_before(mut self, day: NaiveDate) -> Self {
        self.before = Some(day);
        self
    }

    /// Returns `true` if any bound is set.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the message falls inside the window.
    pub fn matches(&self, message: &Message) -> bool {
        let day = message.timestamp.date();
        !(self.after.is_some_and(|after| day < after)
            || self.before.is_some_and(|before| day > before))
    }
}

fn parse_day(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatstatsError::invalid_date(date_str))
}
