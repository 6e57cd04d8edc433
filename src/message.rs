//! Transcript message type.
//!
//! This module provides [`Message`], one logical chat entry recovered from a
//! transcript, and [`MessageType`], the closed set of categories the
//! [classifier](crate::classify) assigns to it.
//!
//! # Examples
//!
//! ```
//! use chatstats::{Message, MessageType};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let msg = Message::new(ts, "Alice", "hello");
//! assert_eq!(msg.sender(), Some("Alice"));
//! assert_eq!(msg.kind, MessageType::Text);
//!
//! let notice = Message::system(ts, "Alice created group \"Trip\"");
//! assert!(notice.is_system());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Category of a message, decided from its content.
///
/// Everything except [`System`](MessageType::System) counts towards the
/// statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Plain text (also the fallback for unrecognized content)
    Text,
    /// Photo placeholder
    Image,
    /// Sticker placeholder
    Sticker,
    /// Audio or voice-note placeholder
    Audio,
    /// Video placeholder
    Video,
    /// Document/file placeholder
    Document,
    /// Membership, encryption and other notices without an author
    System,
}

impl MessageType {
    /// The six types that are counted per participant, in report order.
    pub const COUNTED: [MessageType; 6] = [
        MessageType::Text,
        MessageType::Image,
        MessageType::Sticker,
        MessageType::Audio,
        MessageType::Video,
        MessageType::Document,
    ];

    /// The five media types recognized through placeholder markers.
    pub const MEDIA: [MessageType; 5] = [
        MessageType::Image,
        MessageType::Sticker,
        MessageType::Audio,
        MessageType::Video,
        MessageType::Document,
    ];

    /// Lowercase name used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::Sticker => "sticker",
            MessageType::Audio => "audio",
            MessageType::Video => "video",
            MessageType::Document => "document",
            MessageType::System => "system",
        }
    }

    /// Returns `true` for the placeholder-based media types.
    pub fn is_media(self) -> bool {
        !matches!(self, MessageType::Text | MessageType::System)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageType::Text),
            "image" => Ok(MessageType::Image),
            "sticker" => Ok(MessageType::Sticker),
            "audio" => Ok(MessageType::Audio),
            "video" => Ok(MessageType::Video),
            "document" => Ok(MessageType::Document),
            "system" => Ok(MessageType::System),
            _ => Err(format!("Unknown message type: '{s}'")),
        }
    }
}

/// One logical entry of a chat transcript.
///
/// Produced by the parser, annotated by the classifier and consumed by the
/// aggregator. Messages without a sender are system notices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// When the message was sent, as written in the export (no time zone).
    pub timestamp: NaiveDateTime,

    /// Display name exactly as it appears before the separator.
    ///
    /// `None` for sender-less system notices.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sender: Option<String>,

    /// Full body, continuation lines joined with `\n`.
    pub content: String,

    /// Assigned category. Parsed messages start as `Text` (or `System` for
    /// sender-less notices) until classified.
    pub kind: MessageType,
}

impl Message {
    /// Creates a message with an author. Its type starts as [`MessageType::Text`].
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: Some(sender.into()),
            content: content.into(),
            kind: MessageType::Text,
        }
    }

    /// Creates a sender-less system notice.
    pub fn system(timestamp: NaiveDateTime, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: None,
            content: content.into(),
            kind: MessageType::System,
        }
    }

    /// Builder-style method to set the type.
    #[must_use]
    pub fn with_kind(mut self, kind: MessageType) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the sender, if any.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Returns the message body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns `true` if the message is excluded from statistics.
    pub fn is_system(&self) -> bool {
        self.kind == MessageType::System || self.sender.is_none()
    }

    /// Appends a continuation line to the body.
    pub fn append_line(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }
}
