//! Unified error types for chatstats.
//!
//! Irregular transcript lines are never errors: the parser recovers from them
//! locally. What reaches the caller is either a complete
//! [`AnalyticsRecord`](crate::core::AnalyticsRecord) or exactly one
//! [`ChatstatsError`].
//!
//! Input problems ([`NoMessages`](ChatstatsError::NoMessages),
//! [`Utf8`](ChatstatsError::Utf8)) are kept apart from pseudonymization
//! refusals ([`EmptyParticipants`](ChatstatsError::EmptyParticipants)) so
//! callers can tell "nothing to analyze" from "nothing to rename".

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::parsing::DateFormat;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::AnalyticsRecord;
///
/// fn report(text: &str) -> Result<AnalyticsRecord> {
///     chatstats::analyze_str(text, None)
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// Reading the transcript or writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The transcript produced no countable messages.
    ///
    /// Raised for empty files, files that are not chat exports at all, exports
    /// consisting only of system notices, and date windows that exclude every
    /// message.
    #[error("No messages found in the chat: {reason}")]
    NoMessages {
        /// Why nothing could be analyzed
        reason: String,
    },

    /// The transcript file is not UTF-8 text.
    #[error("{} is not valid UTF-8 text: {source}", path.display())]
    Utf8 {
        /// The offending file
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// A line grammar failed to compile.
    #[error("Cannot build the {grammar:?} line grammar: {source}")]
    Grammar {
        /// The grammar being compiled
        grammar: DateFormat,
        #[source]
        source: regex::Error,
    },

    /// An output format name or path was not recognized.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What was being selected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A date-window bound is not `YYYY-MM-DD`.
    #[error("Invalid date '{input}'. Expected format: YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        input: String,
    },

    /// Unknown language hint.
    #[error("Unknown language '{input}'. Expected one of: es, en")]
    InvalidLanguage {
        /// The rejected input
        input: String,
    },

    /// Pseudonymization was requested for a record without participants.
    #[error("Cannot anonymize a report with no participants")]
    EmptyParticipants,

    /// A pseudonym word list is empty.
    #[error("Pseudonym {list} list must not be empty")]
    EmptyVocabulary {
        /// `"adjective"` or `"noun"`
        list: &'static str,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rendered report was not valid UTF-8.
    #[error("Report encoding error: {0}")]
    Encoding(#[from] FromUtf8Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates a "no countable messages" error.
    pub fn no_messages(reason: impl Into<String>) -> Self {
        ChatstatsError::NoMessages {
            reason: reason.into(),
        }
    }

    /// Wraps a UTF-8 decoding failure of an input file.
    pub fn utf8_input(path: &Path, source: FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wraps a regex compilation failure for a grammar.
    pub fn grammar(grammar: DateFormat, source: regex::Error) -> Self {
        ChatstatsError::Grammar { grammar, source }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatsError::InvalidDate {
            input: input.into(),
        }
    }

    /// Creates an invalid language error.
    pub fn invalid_language(input: impl Into<String>) -> Self {
        ChatstatsError::InvalidLanguage {
            input: input.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// Returns `true` if the transcript yielded nothing to analyze.
    pub fn is_no_messages(&self) -> bool {
        matches!(self, ChatstatsError::NoMessages { .. })
    }

    /// Returns `true` if the input file was not UTF-8.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatstatsError::Utf8 { .. })
    }

    /// Returns `true` if an output format was not recognized.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatstatsError::InvalidFormat { .. })
    }

    /// Returns `true` if a date-window bound was malformed.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatsError::InvalidDate { .. })
    }

    /// Returns `true` if pseudonymization was refused for lack of participants.
    pub fn is_empty_participants(&self) -> bool {
        matches!(self, ChatstatsError::EmptyParticipants)
    }
}
