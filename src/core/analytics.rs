//! The analytics report produced from a transcript.
//!
//! [`AnalyticsRecord`] is the only externally visible output of the pipeline.
//! Its serialized shape is a stable contract: field names, string map keys
//! (including numeric hour and year keys) and the `[date, count]` pairs of
//! `most_active_days`.
//!
//! ```json
//! {
//!   "summary": {
//!     "total_messages": 2,
//!     "participants": ["Alice", "Bob"],
//!     "date_range": {"start": "2024-01-01", "end": "2024-01-01"},
//!     "total_words": 1,
//!     "chat_duration_days": 1
//!   },
//!   "messages_per_year": {"2024": 2},
//!   "messages_per_hour": {"0": 0, "...": 0, "10": 2, "23": 0},
//!   "messages_per_weekday": {"Monday": 2, "Tuesday": 0, "...": 0},
//!   "most_active_days": [["2024-01-01", 2]]
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::MessageType;

/// Headline numbers of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Count of non-system messages
    pub total_messages: u64,
    /// Distinct senders in order of first appearance
    pub participants: Vec<String>,
    /// Dates of the earliest and latest message
    pub date_range: DateRange,
    /// Words across all text messages
    pub total_words: u64,
    /// Inclusive number of calendar days spanned
    pub chat_duration_days: u64,
}

/// First and last day of the analyzed messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Per-type message counts for one participant.
///
/// All six counted types are always present, so serialized reports never omit
/// a zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub text: u64,
    pub image: u64,
    pub sticker: u64,
    pub audio: u64,
    pub video: u64,
    pub document: u64,
}

impl TypeCounts {
    /// Adds one message of the given type. `System` is not counted.
    pub fn increment(&mut self, kind: MessageType) {
        if let Some(slot) = self.slot_mut(kind) {
            *slot += 1;
        }
    }

    /// Returns the count for a type (`System` is always zero).
    pub fn get(&self, kind: MessageType) -> u64 {
        match kind {
            MessageType::Text => self.text,
            MessageType::Image => self.image,
            MessageType::Sticker => self.sticker,
            MessageType::Audio => self.audio,
            MessageType::Video => self.video,
            MessageType::Document => self.document,
            MessageType::System => 0,
        }
    }

    /// Sum over all types.
    pub fn total(&self) -> u64 {
        MessageType::COUNTED.iter().map(|&k| self.get(k)).sum()
    }

    fn slot_mut(&mut self, kind: MessageType) -> Option<&mut u64> {
        match kind {
            MessageType::Text => Some(&mut self.text),
            MessageType::Image => Some(&mut self.image),
            MessageType::Sticker => Some(&mut self.sticker),
            MessageType::Audio => Some(&mut self.audio),
            MessageType::Video => Some(&mut self.video),
            MessageType::Document => Some(&mut self.document),
            MessageType::System => None,
        }
    }
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Message counts per day of week, Monday first.
///
/// Serializes as a map keyed by English weekday names in calendar order, with
/// all seven days present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, u64>")]
pub struct WeekdayCounts([u64; 7]);

impl WeekdayCounts {
    /// Adds one message on the given weekday.
    pub fn increment(&mut self, day: Weekday) {
        self.0[day.num_days_from_monday() as usize] += 1;
    }

    /// Returns the count for a weekday.
    pub fn get(&self, day: Weekday) -> u64 {
        self.0[day.num_days_from_monday() as usize]
    }

    /// Returns the count for an English weekday name.
    pub fn get_by_name(&self, name: &str) -> Option<u64> {
        WEEKDAY_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.0[idx])
    }

    /// Iterates `(name, count)` from Monday to Sunday.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        WEEKDAY_NAMES.iter().copied().zip(self.0.iter().copied())
    }

    /// Sum over all days.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }
}

impl Serialize for WeekdayCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WEEKDAY_NAMES.len()))?;
        for (name, count) in self.iter() {
            map.serialize_entry(name, &count)?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, u64>> for WeekdayCounts {
    type Error = String;

    fn try_from(map: BTreeMap<String, u64>) -> Result<Self, Self::Error> {
        let mut counts = [0u64; 7];
        for (name, count) in map {
            let idx = WEEKDAY_NAMES
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| format!("unknown weekday '{name}'"))?;
            counts[idx] = count;
        }
        Ok(WeekdayCounts(counts))
    }
}

/// The complete analytics report for one transcript.
///
/// Per-participant maps are keyed by display name and always contain every
/// entry of [`Summary::participants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub summary: Summary,
    /// Year → messages
    pub messages_per_year: BTreeMap<i32, u64>,
    /// `YYYY-MM` → messages
    pub messages_per_month: BTreeMap<String, u64>,
    /// Participant → messages
    pub messages_per_participant: BTreeMap<String, u64>,
    /// Participant → per-type counts
    pub message_types_per_participant: BTreeMap<String, TypeCounts>,
    /// Hour of day (0–23, all present) → messages
    pub messages_per_hour: BTreeMap<u32, u64>,
    /// Weekday name → messages
    pub messages_per_weekday: WeekdayCounts,
    /// Busiest days, count descending then date ascending
    pub most_active_days: Vec<(NaiveDate, u64)>,
    /// Participant → words in text messages
    pub word_counts: BTreeMap<String, u64>,
    /// Participant → mean characters per message
    pub avg_message_length: BTreeMap<String, f64>,
}

impl AnalyticsRecord {
    /// Returns the number of participants.
    pub fn participant_count(&self) -> usize {
        self.summary.participants.len()
    }

    /// Checks the cross-field invariants of a report.
    ///
    /// Every bucket family sums to `total_messages`, every participant is a
    /// key of every per-participant map, `total_words` equals the sum of word
    /// counts, and `most_active_days` is correctly ordered. Records built by
    /// the aggregator always pass; this is for callers validating records that
    /// crossed a process boundary.
    pub fn is_consistent(&self) -> bool {
        let total = self.summary.total_messages;

        let sums_match = self.messages_per_participant.values().sum::<u64>() == total
            && self.messages_per_hour.values().sum::<u64>() == total
            && self.messages_per_weekday.total() == total
            && self.messages_per_year.values().sum::<u64>() == total
            && self.messages_per_month.values().sum::<u64>() == total
            && self
                .message_types_per_participant
                .values()
                .map(TypeCounts::total)
                .sum::<u64>()
                == total
            && self.word_counts.values().sum::<u64>() == self.summary.total_words;

        let keys_cover = self.summary.participants.iter().all(|p| {
            self.messages_per_participant.contains_key(p)
                && self.message_types_per_participant.contains_key(p)
                && self.word_counts.contains_key(p)
                && self.avg_message_length.contains_key(p)
        });

        let hours_complete = (0..24).all(|h| self.messages_per_hour.contains_key(&h));

        let days_ordered = self
            .most_active_days
            .windows(2)
            .all(|w| w[0].1 > w[1].1 || (w[0].1 == w[1].1 && w[0].0 < w[1].0));

        sums_match && keys_cover && hours_complete && days_ordered
    }
}
