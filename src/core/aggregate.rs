//! Single-pass aggregation of classified messages into an [`AnalyticsRecord`].
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::AnalyzerConfig;
//! use chatstats::core::Aggregator;
//! use chatstats::Message;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatstats::Result<()> {
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//!
//! let mut aggregator = Aggregator::new(AnalyzerConfig::default());
//! aggregator.push(&Message::new(ts, "Alice", "hello there"));
//! aggregator.push(&Message::new(ts, "Bob", "hi"));
//!
//! let record = aggregator.finish()?;
//! assert_eq!(record.summary.total_messages, 2);
//! assert_eq!(record.summary.total_words, 3);
//! assert_eq!(record.messages_per_hour[&10], 2);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Timelike};

use crate::config::AnalyzerConfig;
use crate::core::analytics::{AnalyticsRecord, DateRange, Summary, TypeCounts, WeekdayCounts};
use crate::error::{ChatstatsError, Result};
use crate::{Message, MessageType};

/// Running totals for one participant.
#[derive(Debug, Default, Clone, Copy)]
struct ParticipantStats {
    messages: u64,
    types: TypeCounts,
    words: u64,
    chars: u64,
}

impl ParticipantStats {
    fn record(&mut self, message: &Message) {
        self.messages += 1;
        self.types.increment(message.kind);
        if message.kind == MessageType::Text {
            self.words += count_words(&message.content);
        }
        self.chars += message.content.chars().count() as u64;
    }

    #[allow(clippy::cast_precision_loss)]
    fn average_length(&self) -> f64 {
        if self.messages == 0 {
            return 0.0;
        }
        self.chars as f64 / self.messages as f64
    }
}

fn count_words(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Incremental builder of an [`AnalyticsRecord`].
///
/// Feed classified messages in transcript order with [`push`](Self::push),
/// then call [`finish`](Self::finish). System messages and messages outside
/// the configured date window are ignored.
#[derive(Debug)]
pub struct Aggregator {
    config: AnalyzerConfig,
    participants: Vec<String>,
    stats: HashMap<String, ParticipantStats>,
    per_year: BTreeMap<i32, u64>,
    per_month: BTreeMap<String, u64>,
    per_hour: [u64; 24],
    per_weekday: WeekdayCounts,
    per_day: HashMap<NaiveDate, u64>,
    first_day: Option<NaiveDate>,
    last_day: Option<NaiveDate>,
    total: u64,
}

impl Aggregator {
    /// Creates an empty aggregator.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            participants: Vec::new(),
            stats: HashMap::new(),
            per_year: BTreeMap::new(),
            per_month: BTreeMap::new(),
            per_hour: [0; 24],
            per_weekday: WeekdayCounts::default(),
            per_day: HashMap::new(),
            first_day: None,
            last_day: None,
            total: 0,
        }
    }

    /// Returns the number of messages counted so far.
    pub fn counted(&self) -> u64 {
        self.total
    }

    /// Adds one message. Returns `true` if it was counted.
    pub fn push(&mut self, message: &Message) -> bool {
        let Some(sender) = message.sender.as_deref() else {
            return false;
        };
        if message.kind == MessageType::System || !self.config.filter.matches(message) {
            return false;
        }

        if !self.stats.contains_key(sender) {
            self.participants.push(sender.to_string());
        }
        self.stats.entry(sender.to_string()).or_default().record(message);

        let ts = message.timestamp;
        let day = ts.date();

        *self.per_year.entry(day.year()).or_insert(0) += 1;
        *self
            .per_month
            .entry(format!("{:04}-{:02}", day.year(), day.month()))
            .or_insert(0) += 1;
        self.per_hour[ts.hour() as usize] += 1;
        self.per_weekday.increment(day.weekday());
        *self.per_day.entry(day).or_insert(0) += 1;

        self.first_day = Some(self.first_day.map_or(day, |d| d.min(day)));
        self.last_day = Some(self.last_day.map_or(day, |d| d.max(day)));
        self.total += 1;
        true
    }

    /// Adds every message of a slice.
    pub fn extend<'a>(&mut self, messages: impl IntoIterator<Item = &'a Message>) {
        for message in messages {
            self.push(message);
        }
    }

    /// Builds the record.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::NoMessages`] if no message was counted.
    pub fn finish(self) -> Result<AnalyticsRecord> {
        let (Some(start), Some(end)) = (self.first_day, self.last_day) else {
            let reason = if self.config.filter.is_active() {
                "no participant messages fall inside the date window"
            } else {
                "the transcript contains no messages from participants"
            };
            return Err(ChatstatsError::no_messages(reason));
        };

        let mut days: Vec<(NaiveDate, u64)> = self.per_day.into_iter().collect();
        days.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        days.truncate(self.config.top_days);

        let mut messages_per_participant = BTreeMap::new();
        let mut message_types_per_participant = BTreeMap::new();
        let mut word_counts = BTreeMap::new();
        let mut avg_message_length = BTreeMap::new();
        let mut total_words = 0;

        for (name, stats) in &self.stats {
            messages_per_participant.insert(name.clone(), stats.messages);
            message_types_per_participant.insert(name.clone(), stats.types);
            word_counts.insert(name.clone(), stats.words);
            avg_message_length.insert(name.clone(), stats.average_length());
            total_words += stats.words;
        }

        let chat_duration_days = u64::try_from((end - start).num_days()).unwrap_or(0) + 1;

        Ok(AnalyticsRecord {
            summary: Summary {
                total_messages: self.total,
                participants: self.participants,
                date_range: DateRange { start, end },
                total_words,
                chat_duration_days,
            },
            messages_per_year: self.per_year,
            messages_per_month: self.per_month,
            messages_per_participant,
            message_types_per_participant,
            messages_per_hour: (0u32..).zip(self.per_hour).collect(),
            messages_per_weekday: self.per_weekday,
            most_active_days: days,
            word_counts,
            avg_message_length,
        })
    }
}

/// Aggregates a slice of classified messages in one call.
///
/// # Errors
///
/// Returns [`ChatstatsError::NoMessages`] if no message is counted.
pub fn aggregate(messages: &[Message], config: &AnalyzerConfig) -> Result<AnalyticsRecord> {
    let mut aggregator = Aggregator::new(config.clone());
    aggregator.extend(messages);
    aggregator.finish()
}
