//! Marker-based message classification.
//!
//! WhatsApp replaces attached media with a fixed, localized placeholder such as
//! `imagen omitida` or `<image omitted>`. The [`Classifier`] assigns each
//! [`Message`] a [`MessageType`] by matching its body against a
//! [`MarkerTable`]; anything unrecognized is plain text.
//!
//! Marker tables are data, so supporting another export language means
//! building a table, not changing code:
//!
//! ```rust
//! use chatstats::classify::{Classifier, MarkerTable};
//! use chatstats::{Message, MessageType};
//! use chrono::NaiveDate;
//!
//! let table = MarkerTable::new()
//!     .with_marker(MessageType::Image, "immagine omessa")
//!     .with_marker(MessageType::Audio, "audio omesso");
//! let classifier = Classifier::new(table);
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! assert_eq!(classifier.classify(&Message::new(ts, "Gio", "immagine omessa")), MessageType::Image);
//! assert_eq!(classifier.classify(&Message::new(ts, "Gio", "ciao")), MessageType::Text);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parser::Language;
use crate::parsing::whatsapp::strip_direction_marks;
use crate::{Message, MessageType};

/// Placeholders written by Spanish exports.
const SPANISH_MARKERS: &[(MessageType, &str)] = &[
    (MessageType::Image, "imagen omitida"),
    (MessageType::Sticker, "sticker omitido"),
    (MessageType::Audio, "audio omitido"),
    (MessageType::Video, "video omitido"),
    (MessageType::Document, "documento omitido"),
];

/// Placeholders written by English exports.
const ENGLISH_MARKERS: &[(MessageType, &str)] = &[
    (MessageType::Image, "image omitted"),
    (MessageType::Sticker, "sticker omitted"),
    (MessageType::Audio, "audio omitted"),
    (MessageType::Video, "video omitted"),
    (MessageType::Document, "document omitted"),
];

/// iOS exports attribute these notices to the group name instead of leaving
/// the sender empty.
const SPANISH_NOTICES: &[&str] =
    &["Los mensajes y las llamadas están cifrados de extremo a extremo"];
const ENGLISH_NOTICES: &[&str] = &["Messages and calls are end-to-end encrypted"];

/// Localized placeholder vocabulary.
///
/// Maps each media [`MessageType`] to the marker strings that stand for it,
/// plus notice prefixes that mark a sendered line as a system message.
/// Matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerTable {
    /// Media type → placeholder strings
    #[serde(default)]
    markers: BTreeMap<MessageType, Vec<String>>,

    /// Body prefixes of system notices that carry a sender
    #[serde(default)]
    system_notices: Vec<String>,
}

impl MarkerTable {
    /// Creates an empty table: every message classifies as text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in Spanish vocabulary.
    pub fn spanish() -> Self {
        Self::from_static(SPANISH_MARKERS, SPANISH_NOTICES)
    }

    /// Built-in English vocabulary.
    pub fn english() -> Self {
        Self::from_static(ENGLISH_MARKERS, ENGLISH_NOTICES)
    }

    /// Every built-in vocabulary merged.
    pub fn all() -> Self {
        Self::spanish().merge(Self::english())
    }

    /// Table for a language hint; no hint selects [`MarkerTable::all`].
    pub fn for_language(language: Option<Language>) -> Self {
        match language {
            Some(Language::Spanish) => Self::spanish(),
            Some(Language::English) => Self::english(),
            None => Self::all(),
        }
    }

    fn from_static(markers: &[(MessageType, &str)], notices: &[&str]) -> Self {
        let table = markers
            .iter()
            .fold(Self::new(), |table, &(kind, marker)| table.with_marker(kind, marker));
        notices
            .iter()
            .fold(table, |table, notice| table.with_system_notice(*notice))
    }

    /// Adds a placeholder for a media type.
    ///
    /// Only media types take markers; `Text` and `System` are ignored.
    #[must_use]
    pub fn with_marker(mut self, kind: MessageType, marker: impl Into<String>) -> Self {
        if kind.is_media() {
            let marker = marker.into();
            let entry = self.markers.entry(kind).or_default();
            if !entry.contains(&marker) {
                entry.push(marker);
            }
        }
        self
    }

    /// Adds a body prefix that identifies a system notice.
    #[must_use]
    pub fn with_system_notice(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !self.system_notices.contains(&prefix) {
            self.system_notices.push(prefix);
        }
        self
    }

    /// Combines two tables.
    #[must_use]
    pub fn merge(self, other: MarkerTable) -> Self {
        let merged = other
            .markers
            .into_iter()
            .flat_map(|(kind, list)| list.into_iter().map(move |m| (kind, m)))
            .fold(self, |table, (kind, marker)| table.with_marker(kind, marker));
        other
            .system_notices
            .into_iter()
            .fold(merged, |table, notice| table.with_system_notice(notice))
    }

    /// Returns the markers registered for a type.
    pub fn markers_for(&self, kind: MessageType) -> &[String] {
        self.markers
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if no markers or notices are registered.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.system_notices.is_empty()
    }

    /// Returns the media type whose placeholder this body is, if any.
    ///
    /// The body is trimmed and one enclosing `<…>` pair removed. It matches a
    /// marker when it equals it, or ends with it after whitespace (iOS
    /// prefixes document placeholders with the file name).
    pub fn match_media(&self, body: &str) -> Option<MessageType> {
        let cleaned = strip_direction_marks(body);
        let trimmed = cleaned.trim();
        let normalized = trimmed
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .map_or(trimmed, str::trim);

        MessageType::MEDIA.into_iter().find(|kind| {
            self.markers_for(*kind)
                .iter()
                .any(|marker| marker_matches(normalized, marker))
        })
    }

    /// Returns `true` if the body opens with a registered system notice.
    pub fn is_system_notice(&self, body: &str) -> bool {
        let cleaned = strip_direction_marks(body);
        let trimmed = cleaned.trim_start();
        self.system_notices
            .iter()
            .any(|notice| trimmed.starts_with(notice.as_str()))
    }
}

fn marker_matches(body: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    if body == marker {
        return true;
    }
    body.strip_suffix(marker)
        .and_then(|head| head.chars().last())
        .is_some_and(char::is_whitespace)
}

/// Assigns [`MessageType`]s from a [`MarkerTable`].
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    table: MarkerTable,
}

impl Classifier {
    /// Creates a classifier over a marker table.
    pub fn new(table: MarkerTable) -> Self {
        Self { table }
    }

    /// Creates a classifier with the built-in table for a language hint.
    pub fn for_language(language: Option<Language>) -> Self {
        Self::new(MarkerTable::for_language(language))
    }

    /// Returns the table in use.
    pub fn table(&self) -> &MarkerTable {
        &self.table
    }

    /// Decides the type of one message.
    ///
    /// Sender-less messages and messages already marked as system stay
    /// `System`; otherwise a known placeholder yields its media type and
    /// anything else is `Text`.
    pub fn classify(&self, message: &Message) -> MessageType {
        if message.is_system() || self.table.is_system_notice(&message.content) {
            return MessageType::System;
        }
        self.table
            .match_media(&message.content)
            .unwrap_or(MessageType::Text)
    }

    /// Classifies every message in place.
    pub fn classify_all(&self, messages: &mut [Message]) {
        for message in messages.iter_mut() {
            message.kind = self.classify(message);
        }
    }
}
