//! WhatsApp transcript line grammar.
//!
//! Every message line of an export starts with a localized date/time prefix:
//!
//! | Grammar | Example prefix |
//! |---------|----------------|
//! | [`Iso`](DateFormat::Iso) | `2024-01-15, 10:30 - ` |
//! | [`UsBracketed`](DateFormat::UsBracketed) | `[1/15/24, 10:30:45 AM] ` |
//! | [`UsDash`](DateFormat::UsDash) | `1/15/24, 10:30 AM - ` |
//! | [`DayFirstBracketed`](DateFormat::DayFirstBracketed) | `[15/01/24, 10:30:45] ` |
//! | [`DayFirstDash`](DateFormat::DayFirstDash) | `15/01/2024, 10:30 - ` |
//! | [`DotBracketed`](DateFormat::DotBracketed) | `[15.01.24, 10:30:45] ` |
//! | [`DotDash`](DateFormat::DotDash) | `15.01.2024, 10:30 - ` |
//!
//! The prefix is followed either by `Sender: body` or, for system notices,
//! directly by the notice text.

use std::borrow::Cow;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ChatstatsError, Result};
use crate::parser::Language;

/// Time component shared by every grammar: `H:MM`, `H:MM:SS`, optional
/// `AM`/`PM` (also Spanish `a. m.`/`p. m.`).
const TIME_PATTERN: &str = r"(\d{1,2}:\d{2}(?::\d{2})?(?:\s?[AaPp]\.?\s?[Mm]\.?)?)";

/// Date/time layouts found in WhatsApp exports.
///
/// Month-first and day-first slash layouts share one textual shape; they
/// differ only in how the date is read, which detection settles by checking
/// which reading yields valid dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `2024-01-15, 10:30 - Sender: Message`
    Iso,
    /// `[1/15/24, 10:30:45 AM] Sender: Message` (iOS, US locale)
    UsBracketed,
    /// `1/15/24, 10:30 AM - Sender: Message` (Android, US locale)
    UsDash,
    /// `[15/01/24, 10:30:45] Sender: Message` (iOS, most other locales)
    DayFirstBracketed,
    /// `15/01/2024, 10:30 - Sender: Message` (Android, most other locales)
    DayFirstDash,
    /// `[15.01.24, 10:30:45] Sender: Message`
    DotBracketed,
    /// `15.01.2024, 10:30 - Sender: Message`
    DotDash,
}

impl DateFormat {
    /// Returns the regex for the line prefix, capturing date and time.
    pub fn prefix_pattern(self) -> String {
        let (open, date, close) = match self {
            DateFormat::Iso => ("", r"(\d{4}-\d{1,2}-\d{1,2})", r"\s-\s"),
            DateFormat::UsBracketed | DateFormat::DayFirstBracketed => {
                (r"\[", r"(\d{1,2}/\d{1,2}/\d{2,4})", r"\]\s")
            }
            DateFormat::UsDash | DateFormat::DayFirstDash => {
                ("", r"(\d{1,2}/\d{1,2}/\d{2,4})", r"\s-\s")
            }
            DateFormat::DotBracketed => (r"\[", r"(\d{1,2}\.\d{1,2}\.\d{2,4})", r"\]\s"),
            DateFormat::DotDash => ("", r"(\d{1,2}\.\d{1,2}\.\d{2,4})", r"\s-\s"),
        };
        format!(r"^{open}{date},?\s{TIME_PATTERN}{close}")
    }

    /// Returns chrono date formats, two-digit years first.
    pub fn date_parse_formats(self) -> &'static [&'static str] {
        match self {
            DateFormat::Iso => &["%Y-%m-%d"],
            DateFormat::UsBracketed | DateFormat::UsDash => &["%m/%d/%y", "%m/%d/%Y"],
            DateFormat::DayFirstBracketed | DateFormat::DayFirstDash => &["%d/%m/%y", "%d/%m/%Y"],
            DateFormat::DotBracketed | DateFormat::DotDash => &["%d.%m.%y", "%d.%m.%Y"],
        }
    }

    /// Returns all grammars.
    pub fn all() -> &'static [DateFormat] {
        &[
            DateFormat::Iso,
            DateFormat::UsBracketed,
            DateFormat::UsDash,
            DateFormat::DayFirstBracketed,
            DateFormat::DayFirstDash,
            DateFormat::DotBracketed,
            DateFormat::DotDash,
        ]
    }

    /// Returns all grammars in tie-break order for a language.
    ///
    /// English puts month-first layouts ahead of day-first ones; Spanish and
    /// an absent hint do the opposite.
    pub fn preference_order(language: Option<Language>) -> &'static [DateFormat] {
        if language.is_some_and(|l| l.prefers_month_first()) {
            Self::all()
        } else {
            &[
                DateFormat::Iso,
                DateFormat::DayFirstBracketed,
                DateFormat::DayFirstDash,
                DateFormat::UsBracketed,
                DateFormat::UsDash,
                DateFormat::DotBracketed,
                DateFormat::DotDash,
            ]
        }
    }
}

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Rewrites exporter time spellings into something chrono reads:
/// no-break spaces become spaces and `p. m.` becomes `PM`.
fn normalize_time(time_str: &str) -> String {
    time_str
        .replace(['\u{202f}', '\u{a0}'], " ")
        .replace('.', "")
        .to_uppercase()
        .replace("A M", "AM")
        .replace("P M", "PM")
}

/// Parse a timestamp from the captured date and time strings.
pub fn parse_whatsapp_timestamp(
    date_str: &str,
    time_str: &str,
    format: DateFormat,
) -> Option<NaiveDateTime> {
    let date = format
        .date_parse_formats()
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(date_str, f).ok())?;

    let time_str = normalize_time(time_str);
    let time = TIME_FORMATS
        .iter()
        .find_map(|f| NaiveTime::parse_from_str(&time_str, f).ok())?;

    Some(date.and_time(time))
}

fn is_direction_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200e}' | '\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2066}'..='\u{2069}' | '\u{feff}'
    )
}

/// Removes bidi control characters and byte-order marks.
///
/// Exporters sprinkle these around names and media placeholders; they are
/// invisible but break anchored matching.
pub fn strip_direction_marks(line: &str) -> Cow<'_, str> {
    if line.chars().any(is_direction_mark) {
        Cow::Owned(line.chars().filter(|&c| !is_direction_mark(c)).collect())
    } else {
        Cow::Borrowed(line)
    }
}

/// How a single transcript line was recognized.
#[derive(Debug, Clone, PartialEq)]
pub enum LineMatch<'a> {
    /// `<prefix>Sender: body` starts a participant message.
    Message {
        timestamp: NaiveDateTime,
        sender: &'a str,
        body: &'a str,
    },
    /// `<prefix>notice` starts a sender-less system notice.
    Notice {
        timestamp: NaiveDateTime,
        body: &'a str,
    },
    /// Anything else: a continuation line or noise.
    Other,
}

/// Compiled line recognizer for one [`DateFormat`].
#[derive(Debug, Clone)]
pub struct LineGrammar {
    format: DateFormat,
    message: Regex,
    notice: Regex,
}

impl LineGrammar {
    /// Compiles the recognizer for a grammar.
    pub fn new(format: DateFormat) -> Result<Self> {
        let prefix = format.prefix_pattern();
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| ChatstatsError::grammar(format, e))
        };
        Ok(Self {
            format,
            message: compile(format!(r"{prefix}([^:]+):\s?(.*)$"))?,
            notice: compile(format!(r"{prefix}(.*)$"))?,
        })
    }

    /// Returns the grammar this recognizer was built for.
    pub fn format(&self) -> DateFormat {
        self.format
    }

    /// Classifies one line (direction marks already stripped).
    ///
    /// A line whose prefix matches but whose date or time is invalid is
    /// reported as [`LineMatch::Other`].
    pub fn match_line<'a>(&self, line: &'a str) -> LineMatch<'a> {
        if let Some(caps) = self.message.captures(line) {
            let date = caps.get(1).map_or("", |m| m.as_str());
            let time = caps.get(2).map_or("", |m| m.as_str());
            let sender = caps.get(3).map_or("", |m| m.as_str());
            let body = caps.get(4).map_or("", |m| m.as_str());

            return match parse_whatsapp_timestamp(date, time, self.format) {
                Some(timestamp) if !sender.trim().is_empty() => LineMatch::Message {
                    timestamp,
                    sender,
                    body,
                },
                Some(timestamp) => LineMatch::Notice { timestamp, body },
                None => LineMatch::Other,
            };
        }

        if let Some(caps) = self.notice.captures(line) {
            let date = caps.get(1).map_or("", |m| m.as_str());
            let time = caps.get(2).map_or("", |m| m.as_str());
            let body = caps.get(3).map_or("", |m| m.as_str());

            if let Some(timestamp) = parse_whatsapp_timestamp(date, time, self.format) {
                return LineMatch::Notice { timestamp, body };
            }
        }

        LineMatch::Other
    }

    /// Returns `true` if the line starts a message or notice.
    pub fn starts_entry(&self, line: &str) -> bool {
        !matches!(self.match_line(line), LineMatch::Other)
    }
}

/// Auto-detect the date grammar by scoring the given lines.
///
/// Each grammar scores one point per line it recognizes with a valid
/// timestamp. The highest score wins; ties go to the grammar listed first in
/// [`DateFormat::preference_order`]. Returns `None` if nothing matches.
pub fn detect_whatsapp_format(lines: &[&str], language: Option<Language>) -> Option<DateFormat> {
    let grammars: Vec<LineGrammar> = DateFormat::preference_order(language)
        .iter()
        .filter_map(|&f| LineGrammar::new(f).ok())
        .collect();

    let scores: Vec<usize> = grammars
        .iter()
        .map(|g| lines.iter().filter(|line| g.starts_entry(line)).count())
        .collect();

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(grammars[winner_idx].format())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_detect_format_iso() {
        let lines = vec![
            "2024-01-01, 10:00 - Alice: hello",
            "2024-01-01, 10:05 - Bob: <image omitted>",
        ];
        assert_eq!(detect_whatsapp_format(&lines, None), Some(DateFormat::Iso));
    }

    #[test]
    fn test_detect_format_us_bracketed_for_english() {
        let lines = vec![
            "[1/15/24, 10:30:45 AM] Alice: Hello",
            "[1/15/24, 10:31:00 AM] Bob: Hi there",
        ];
        assert_eq!(
            detect_whatsapp_format(&lines, Some(Language::English)),
            Some(DateFormat::UsBracketed)
        );
    }

    #[test]
    fn test_detect_day_first_wins_when_day_exceeds_twelve() {
        // 15 cannot be a month, so only the day-first reading scores
        let lines = vec![
            "[15/01/24, 10:30:45] Alice: Hola",
            "[15/01/24, 10:31:00] Bob: Qué tal",
        ];
        assert_eq!(
            detect_whatsapp_format(&lines, Some(Language::English)),
            Some(DateFormat::DayFirstBracketed)
        );
    }

    #[test]
    fn test_detect_ambiguous_follows_language() {
        let lines = vec!["3/4/24, 10:30 - Alice: hi", "3/4/24, 10:31 - Bob: hey"];
        assert_eq!(
            detect_whatsapp_format(&lines, Some(Language::Spanish)),
            Some(DateFormat::DayFirstDash)
        );
        assert_eq!(
            detect_whatsapp_format(&lines, Some(Language::English)),
            Some(DateFormat::UsDash)
        );
        assert_eq!(detect_whatsapp_format(&lines, None), Some(DateFormat::DayFirstDash));
    }

    #[test]
    fn test_detect_format_dots() {
        let lines = vec![
            "26.10.2025, 20:40 - Alice: Hello",
            "26.10.2025, 20:41 - Bob: Hi there",
        ];
        assert_eq!(detect_whatsapp_format(&lines, None), Some(DateFormat::DotDash));

        let lines = vec!["[15.01.24, 10:30:45] Alice: Hello"];
        assert_eq!(detect_whatsapp_format(&lines, None), Some(DateFormat::DotBracketed));
    }

    #[test]
    fn test_detect_nothing() {
        let lines = vec!["just some text", "more text"];
        assert_eq!(detect_whatsapp_format(&lines, None), None);
        assert_eq!(detect_whatsapp_format(&[], None), None);
    }

    #[test]
    fn test_parse_timestamp_iso() {
        let ts = parse_whatsapp_timestamp("2024-01-01", "10:05", DateFormat::Iso);
        assert_eq!(ts, Some(dt(2024, 1, 1, 10, 5, 0)));
    }

    #[test]
    fn test_parse_timestamp_us_pm() {
        let ts = parse_whatsapp_timestamp("1/15/24", "10:30:45 PM", DateFormat::UsBracketed);
        assert_eq!(ts, Some(dt(2024, 1, 15, 22, 30, 45)));
    }

    #[test]
    fn test_parse_timestamp_spanish_meridiem() {
        let ts = parse_whatsapp_timestamp("15/1/24", "9:05\u{a0}p.\u{a0}m.", DateFormat::DayFirstDash);
        let ts = ts.unwrap();
        assert_eq!(ts.hour(), 21);
        assert_eq!(ts.minute(), 5);
    }

    #[test]
    fn test_parse_timestamp_narrow_space() {
        let ts = parse_whatsapp_timestamp("1/15/24", "10:30\u{202f}AM", DateFormat::UsDash);
        assert_eq!(ts, Some(dt(2024, 1, 15, 10, 30, 0)));
    }

    #[test]
    fn test_parse_timestamp_four_digit_year() {
        let ts = parse_whatsapp_timestamp("15/01/2024", "10:30", DateFormat::DayFirstDash).unwrap();
        assert_eq!(ts.year(), 2024);

        let ts = parse_whatsapp_timestamp("15.01.24", "10:30:45", DateFormat::DotBracketed).unwrap();
        assert_eq!(ts.year(), 2024);
    }

    #[test]
    fn test_parse_timestamp_invalid() {
        assert!(parse_whatsapp_timestamp("13/13/24", "10:30", DateFormat::DayFirstDash).is_none());
        assert!(parse_whatsapp_timestamp("2024-01-01", "25:00", DateFormat::Iso).is_none());
    }

    #[test]
    fn test_match_line_message() {
        let grammar = LineGrammar::new(DateFormat::Iso).unwrap();
        match grammar.match_line("2024-01-01, 10:00 - Alice: hello: world") {
            LineMatch::Message {
                timestamp,
                sender,
                body,
            } => {
                assert_eq!(timestamp, dt(2024, 1, 1, 10, 0, 0));
                assert_eq!(sender, "Alice");
                assert_eq!(body, "hello: world");
            }
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn test_match_line_notice() {
        let grammar = LineGrammar::new(DateFormat::Iso).unwrap();
        assert!(matches!(
            grammar.match_line("2024-01-01, 10:00 - Alice created group \"Trip\""),
            LineMatch::Notice { body: "Alice created group \"Trip\"", .. }
        ));
    }

    #[test]
    fn test_match_line_other() {
        let grammar = LineGrammar::new(DateFormat::Iso).unwrap();
        assert_eq!(grammar.match_line("continuation text"), LineMatch::Other);
        assert_eq!(grammar.match_line(""), LineMatch::Other);
        // Valid shape, impossible date
        assert_eq!(grammar.match_line("2024-02-30, 10:00 - Alice: hi"), LineMatch::Other);
    }

    #[test]
    fn test_match_line_preserves_sender_spacing() {
        let grammar = LineGrammar::new(DateFormat::DayFirstDash).unwrap();
        match grammar.match_line("15/01/2024, 10:30 - María José : hola") {
            LineMatch::Message { sender, .. } => assert_eq!(sender, "María José "),
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[test]
    fn test_strip_direction_marks() {
        assert_eq!(strip_direction_marks("\u{200e}imagen omitida"), "imagen omitida");
        assert_eq!(strip_direction_marks("\u{feff}[1/1/24, 10:00:00] A: b"), "[1/1/24, 10:00:00] A: b");
        assert!(matches!(strip_direction_marks("plain"), Cow::Borrowed("plain")));
    }
}
