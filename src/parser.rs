//! Parser trait for chat transcripts.
//!
//! This module provides the [`Parser`] trait every transcript parser
//! implements, and [`Language`], the export language hint that selects the
//! media-marker vocabulary and breaks ties between ambiguous date grammars.
//!
//! # Example
//!
//! ```rust
//! use chatstats::parser::{Language, Parser, create_parser};
//!
//! let parser = create_parser(Some(Language::English));
//! let messages = parser.parse_str("2024-01-01, 10:00 - Alice: hello")?;
//! assert_eq!(messages.len(), 1);
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::ParserConfig;
use crate::error::{ChatstatsError, Result};
use crate::parsers::WhatsAppParser;

/// Language the transcript was exported in.
///
/// WhatsApp localizes both its date layout and the placeholders it writes in
/// place of attached media, so the hint matters for classification.
///
/// # Example
///
/// ```rust
/// use chatstats::parser::Language;
///
/// let lang: Language = "es".parse()?;
/// assert_eq!(lang, Language::Spanish);
///
/// // Aliases are supported
/// let lang: Language = "English".parse()?;
/// assert_eq!(lang, Language::English);
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Language {
    /// Spanish exports (`imagen omitida`, day-first dates)
    #[serde(rename = "es", alias = "spanish")]
    Spanish,

    /// English exports (`image omitted`, month-first dates on US phones)
    #[serde(rename = "en", alias = "english")]
    English,
}

impl Language {
    /// Returns the two-letter code of this language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
        }
    }

    /// Returns all supported languages.
    pub fn all() -> &'static [Language] {
        &[Language::Spanish, Language::English]
    }

    /// Whether ambiguous `a/b/yy` dates should be read month-first.
    pub fn prefers_month_first(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ChatstatsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "es" | "spanish" | "español" | "espanol" => Ok(Language::Spanish),
            "en" | "english" => Ok(Language::English),
            _ => Err(ChatstatsError::invalid_language(s)),
        }
    }
}

/// Common interface of transcript parsers.
///
/// Implementations turn raw transcript text into an ordered sequence of
/// [`Message`]s. Irregular lines are recovered locally; the only hard failure
/// is a transcript without a single participant message.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the language hint this parser was configured with.
    fn language(&self) -> Option<Language>;

    /// Parses a transcript held in memory.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>>;

    /// Reads and parses a transcript file.
    ///
    /// The file must be UTF-8; a leading byte-order mark is tolerated.
    fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8(bytes).map_err(|e| ChatstatsError::utf8_input(path, e))?;
        self.parse_str(&content)
    }
}

/// Creates the transcript parser for an optional language hint.
pub fn create_parser(language: Option<Language>) -> Box<dyn Parser> {
    let config = ParserConfig::new().with_language(language);
    Box::new(WhatsAppParser::with_config(config))
}
