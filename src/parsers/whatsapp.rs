//! WhatsApp TXT transcript parser.
//!
//! WhatsApp exports vary by locale. Unless a grammar is configured, this
//! parser auto-detects it by scoring every non-empty line of the transcript,
//! so a long preamble or an ambiguous opening stretch cannot mislead it.
//!
//! Line handling:
//! - `<prefix>Sender: body` opens a participant message
//! - `<prefix>notice` opens a sender-less system notice
//! - anything else continues the open message, or is dropped if none is open
//!
//! Blank lines are kept inside a message body only when more text follows
//! them, so trailing blank lines never inflate message lengths.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::Message;
use crate::config::ParserConfig;
use crate::error::{ChatstatsError, Result};
use crate::parser::{Language, Parser};
use crate::parsing::whatsapp::{
    DateFormat, LineGrammar, LineMatch, detect_whatsapp_format, strip_direction_marks,
};

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatstats::parsers::WhatsAppParser;
/// use chatstats::parser::Parser;
///
/// let parser = WhatsAppParser::new();
/// let messages = parser.parse_str(
///     "2024-01-01, 10:00 - Alice: hello\n\
///      second line\n\
///      2024-01-01, 10:05 - Bob: hi",
/// )?;
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].content, "hello\nsecond line");
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub struct WhatsAppParser {
    config: ParserConfig,
}

impl WhatsAppParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn resolve_format(&self, lines: &[&str]) -> Result<DateFormat> {
        if let Some(format) = self.config.date_format {
            return Ok(format);
        }

        let candidates: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|line| !line.trim().is_empty())
            .collect();

        let format = detect_whatsapp_format(&candidates, self.config.language).ok_or_else(|| {
            ChatstatsError::no_messages(
                "no line matches a known WhatsApp date format; \
                 make sure the file is a WhatsApp chat export",
            )
        })?;
        debug!(?format, scored = candidates.len(), "detected date format");
        Ok(format)
    }

    /// Parses content from a string (internal implementation).
    fn parse_content(&self, content: &str) -> Result<Vec<Message>> {
        let cleaned: Vec<_> = content.lines().map(strip_direction_marks).collect();
        let lines: Vec<&str> = cleaned.iter().map(|l| l.as_ref()).collect();

        let format = self.resolve_format(&lines)?;
        let grammar = LineGrammar::new(format)?;

        let mut messages: Vec<Message> = Vec::new();
        let mut pending_blank = 0usize;
        let mut discarded = 0usize;
        let mut out_of_order = 0usize;
        let mut last_seen: Option<NaiveDateTime> = None;

        for (idx, line) in lines.iter().enumerate() {
            let opened = match grammar.match_line(line) {
                LineMatch::Message {
                    timestamp,
                    sender,
                    body,
                } => Some(Message::new(timestamp, sender, body)),
                LineMatch::Notice { timestamp, body } => Some(Message::system(timestamp, body)),
                LineMatch::Other => None,
            };

            if let Some(msg) = opened {
                if last_seen.is_some_and(|prev| msg.timestamp < prev) {
                    out_of_order += 1;
                }
                last_seen = Some(msg.timestamp);
                pending_blank = 0;
                messages.push(msg);
            } else if let Some(open) = messages.last_mut() {
                if line.trim().is_empty() {
                    pending_blank += 1;
                } else {
                    for _ in 0..pending_blank {
                        open.append_line("");
                    }
                    pending_blank = 0;
                    open.append_line(line);
                }
            } else if !line.trim().is_empty() {
                debug!(line = idx + 1, "dropping line before first message");
                discarded += 1;
            }
        }

        if out_of_order > 0 {
            warn!(out_of_order, "transcript timestamps are not in chronological order");
        }

        let participant_messages = messages.iter().filter(|m| m.sender.is_some()).count();
        debug!(
            ?format,
            messages = messages.len(),
            participant_messages,
            discarded,
            "parsed transcript"
        );

        if participant_messages == 0 {
            return Err(ChatstatsError::no_messages(
                "the transcript contains no messages from participants",
            ));
        }

        Ok(messages)
    }
}

impl Default for WhatsAppParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for WhatsAppParser {
    fn name(&self) -> &'static str {
        "WhatsApp"
    }

    fn language(&self) -> Option<Language> {
        self.config.language
    }

    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        self.parse_content(content)
    }
}
