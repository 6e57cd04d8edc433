//! End-to-end pipeline: transcript text in, [`AnalyticsRecord`] out.
//!
//! [`analyze_str`] and [`analyze_file`] cover the common case. [`Analysis`]
//! exposes every knob of the parser, classifier and aggregator.
//!
//! # Example
//!
//! ```rust
//! use chatstats::analyze::Analysis;
//! use chatstats::parser::Language;
//!
//! # fn main() -> chatstats::Result<()> {
//! let record = Analysis::new()
//!     .language(Language::Spanish)
//!     .top_days(3)
//!     .after("2024-01-01")?
//!     .run_str("[15/01/24, 10:30:45] Ana: imagen omitida\n[15/01/24, 10:31:00] Luis: hola")?;
//!
//! assert_eq!(record.message_types_per_participant["Ana"].image, 1);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::info;

use crate::Message;
use crate::classify::{Classifier, MarkerTable};
use crate::config::{AnalyzerConfig, ParserConfig};
use crate::core::aggregate::Aggregator;
use crate::core::analytics::AnalyticsRecord;
use crate::core::filter::FilterConfig;
use crate::error::Result;
use crate::parser::{Language, Parser};
use crate::parsers::WhatsAppParser;
use crate::parsing::DateFormat;

/// Configurable analysis run.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    parser: ParserConfig,
    analyzer: AnalyzerConfig,
}

impl Analysis {
    /// Creates a run with auto-detection and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a run from explicit configurations.
    pub fn with_configs(parser: ParserConfig, analyzer: AnalyzerConfig) -> Self {
        Self { parser, analyzer }
    }

    /// Sets the export language.
    #[must_use]
    pub fn language(mut self, language: Language) -> Self {
        self.parser = self.parser.with_language(Some(language));
        self
    }

    /// Sets or clears the export language.
    #[must_use]
    pub fn maybe_language(mut self, language: Option<Language>) -> Self {
        self.parser = self.parser.with_language(language);
        self
    }

    /// Fixes the date grammar.
    #[must_use]
    pub fn date_format(mut self, format: DateFormat) -> Self {
        self.parser = self.parser.with_date_format(format);
        self
    }

    /// Replaces the media marker table.
    #[must_use]
    pub fn markers(mut self, markers: MarkerTable) -> Self {
        self.parser = self.parser.with_markers(markers);
        self
    }

    /// Sets the length of the busiest-days ranking.
    #[must_use]
    pub fn top_days(mut self, top_days: usize) -> Self {
        self.analyzer = self.analyzer.with_top_days(top_days);
        self
    }

    /// Sets the whole date window.
    #[must_use]
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.analyzer = self.analyzer.with_filter(filter);
        self
    }

    /// Ignores messages before this day (`YYYY-MM-DD`, inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`](crate::ChatstatsError::InvalidDate)
    /// if the date is malformed.
    pub fn after(mut self, date: &str) -> Result<Self> {
        self.analyzer.filter = self.analyzer.filter.with_date_from(date)?;
        Ok(self)
    }

    /// Ignores messages after this day (`YYYY-MM-DD`, inclusive).
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`](crate::ChatstatsError::InvalidDate)
    /// if the date is malformed.
    pub fn before(mut self, date: &str) -> Result<Self> {
        self.analyzer.filter = self.analyzer.filter.with_date_to(date)?;
        Ok(self)
    }

    pub fn parser_config(&self) -> &ParserConfig {
        &self.parser
    }

    pub fn analyzer_config(&self) -> &AnalyzerConfig {
        &self.analyzer
    }

    /// Parses and classifies a transcript without aggregating it.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::NoMessages`](crate::ChatstatsError::NoMessages)
    /// if the text holds no participant message.
    pub fn messages_str(&self, text: &str) -> Result<Vec<Message>> {
        let messages = self.parser().parse_str(text)?;
        Ok(self.classify(messages))
    }

    fn parser(&self) -> WhatsAppParser {
        WhatsAppParser::with_config(self.parser.clone())
    }

    fn classify(&self, mut messages: Vec<Message>) -> Vec<Message> {
        Classifier::new(self.parser.markers()).classify_all(&mut messages);
        messages
    }

    fn aggregate(&self, messages: &[Message]) -> Result<AnalyticsRecord> {
        let mut aggregator = Aggregator::new(self.analyzer.clone());
        aggregator.extend(messages);
        let record = aggregator.finish()?;

        info!(
            parsed = messages.len(),
            counted = record.summary.total_messages,
            participants = record.participant_count(),
            days = record.summary.chat_duration_days,
            "analysis complete"
        );
        Ok(record)
    }

    /// Runs the full pipeline over transcript text.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::NoMessages`](crate::ChatstatsError::NoMessages)
    /// if nothing is left to count.
    pub fn run_str(&self, text: &str) -> Result<AnalyticsRecord> {
        let messages = self.messages_str(text)?;
        self.aggregate(&messages)
    }

    /// Reads a UTF-8 transcript file and runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns an I/O or UTF-8 error if the file cannot be read, otherwise
    /// the same errors as [`run_str`](Self::run_str).
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<AnalyticsRecord> {
        let messages = self.classify(self.parser().parse(path.as_ref())?);
        self.aggregate(&messages)
    }
}

/// Analyzes transcript text with default settings.
///
/// # Errors
///
/// Returns [`ChatstatsError::NoMessages`](crate::ChatstatsError::NoMessages)
/// for empty or unrecognizable input.
pub fn analyze_str(text: &str, language: Option<Language>) -> Result<AnalyticsRecord> {
    Analysis::new().maybe_language(language).run_str(text)
}

/// Analyzes a transcript file with default settings.
///
/// # Errors
///
/// Returns an I/O or UTF-8 error if the file cannot be read, or
/// [`ChatstatsError::NoMessages`](crate::ChatstatsError::NoMessages) for
/// unrecognizable content.
pub fn analyze_file(path: impl AsRef<Path>, language: Option<Language>) -> Result<AnalyticsRecord> {
    Analysis::new().maybe_language(language).run_file(path)
}
