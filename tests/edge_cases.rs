//! Edge case tests for chatstats
//!
//! These tests cover transcript quirks and boundary conditions
//! that the fixture-based integration tests do not reach.

use chatstats::classify::{Classifier, MarkerTable};
use chatstats::config::{AnalyzerConfig, ParserConfig};
use chatstats::core::filter::FilterConfig;
use chatstats::parser::{Language, Parser};
use chatstats::parsers::WhatsAppParser;
use chatstats::{Analysis, MessageType, analyze_str};
use chrono::{NaiveDate, Weekday};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn parse(content: &str) -> Vec<chatstats::Message> {
    WhatsAppParser::new().parse_str(content).unwrap()
}

// =========================================================================
// Unicode and special character tests
// =========================================================================

#[test]
fn test_unicode_senders() {
    let record = analyze_str(
        "2024-01-01, 10:00 - Иван: Привет мир!\n\
         2024-01-01, 10:01 - 田中太郎: こんにちは世界！\n\
         2024-01-01, 10:02 - محمد: مرحبا بالعالم\n\
         2024-01-01, 10:03 - User 🎉: Hello 👋 World 🌍",
        None,
    )
    .unwrap();

    assert_eq!(
        record.summary.participants,
        vec!["Иван", "田中太郎", "محمد", "User 🎉"]
    );
    assert_eq!(record.word_counts["Иван"], 2);
    assert_eq!(record.word_counts["User 🎉"], 4);
}

#[test]
fn test_average_length_counts_characters_not_bytes() {
    let record = analyze_str("2024-01-01, 10:00 - Иван: Привет", None).unwrap();
    assert!((record.avg_message_length["Иван"] - 6.0).abs() < 1e-9);
}

#[test]
fn test_colon_in_body_stays_in_body() {
    let messages = parse("2024-01-01, 10:00 - Alice: link: https://example.com/a?b=c:d");
    assert_eq!(messages[0].sender(), Some("Alice"));
    assert_eq!(messages[0].content, "link: https://example.com/a?b=c:d");
}

#[test]
fn test_sender_ends_at_first_colon() {
    let messages = parse("2024-01-01, 10:00 - Ana: la del gym: hola");
    assert_eq!(messages[0].sender(), Some("Ana"));
    assert_eq!(messages[0].content, "la del gym: hola");
}

#[test]
fn test_phone_number_sender() {
    let record = analyze_str("2024-01-01, 10:00 - +34 600 12 34 56: hola", None).unwrap();
    assert_eq!(record.summary.participants, vec!["+34 600 12 34 56"]);
}

#[test]
fn test_direction_marks_are_invisible() {
    let record = analyze_str(
        "\u{200e}2024-01-01, 10:00 - \u{202a}Alice\u{202c}: hola\n\
         2024-01-01, 10:01 - Alice: \u{200e}<image omitted>",
        None,
    )
    .unwrap();

    assert_eq!(record.summary.participants, vec!["Alice"]);
    assert_eq!(record.messages_per_participant["Alice"], 2);
    assert_eq!(record.message_types_per_participant["Alice"].image, 1);
}

#[test]
fn test_narrow_no_break_space_before_meridiem() {
    let messages = parse("1/15/24, 9:05\u{202f}PM - Alice: hi");
    assert_eq!(messages[0].timestamp, day(2024, 1, 15).and_hms_opt(21, 5, 0).unwrap());
}

// =========================================================================
// Line structure tests
// =========================================================================

#[test]
fn test_blank_lines_inside_body_are_kept() {
    let messages = parse(
        "2024-01-01, 10:00 - Alice: first\n\
         \n\
         after blank\n\
         2024-01-01, 10:05 - Bob: ok",
    );
    assert_eq!(messages[0].content, "first\n\nafter blank");
}

#[test]
fn test_trailing_blank_lines_are_dropped() {
    let messages = parse("2024-01-01, 10:00 - Alice: first\n\n\n\n2024-01-01, 10:05 - Bob: ok\n\n");
    assert_eq!(messages[0].content, "first");
    assert_eq!(messages[1].content, "ok");
}

#[test]
fn test_lines_before_first_message_are_dropped() {
    let record = analyze_str(
        "exported from my phone\n\
         ---\n\
         2024-01-01, 10:00 - Alice: hola",
        None,
    )
    .unwrap();
    assert_eq!(record.summary.total_messages, 1);
    assert!((record.avg_message_length["Alice"] - 4.0).abs() < 1e-9);
}

#[test]
fn test_invalid_date_line_is_a_continuation() {
    let messages = parse(
        "2024-02-28, 10:00 - Alice: before\n\
         2024-02-30, 10:00 - Bob: impossible day",
    );
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "before\n2024-02-30, 10:00 - Bob: impossible day");
}

#[test]
fn test_leap_day() {
    let record = analyze_str("2024-02-29, 23:59 - Alice: leap", None).unwrap();
    assert_eq!(record.summary.date_range.start, day(2024, 2, 29));
    assert_eq!(record.messages_per_weekday.get(Weekday::Thu), 1);
    assert_eq!(record.messages_per_hour[&23], 1);
}

#[test]
fn test_out_of_order_timestamps_still_counted() {
    let record = analyze_str(
        "2024-03-10, 10:00 - Alice: later\n\
         2024-03-01, 10:00 - Bob: earlier\n\
         2024-03-05, 10:00 - Alice: middle",
        None,
    )
    .unwrap();

    assert_eq!(record.summary.total_messages, 3);
    assert_eq!(record.summary.date_range.start, day(2024, 3, 1));
    assert_eq!(record.summary.date_range.end, day(2024, 3, 10));
    assert_eq!(record.summary.chat_duration_days, 10);
    assert_eq!(record.summary.participants, vec!["Alice", "Bob"]);
}

#[test]
fn test_year_boundary_buckets() {
    let record = analyze_str(
        "2023-12-31, 23:59 - Alice: last of the year\n\
         2024-01-01, 00:00 - Bob: first of the year",
        None,
    )
    .unwrap();

    assert_eq!(record.messages_per_year[&2023], 1);
    assert_eq!(record.messages_per_year[&2024], 1);
    assert_eq!(record.messages_per_month["2023-12"], 1);
    assert_eq!(record.messages_per_month["2024-01"], 1);
    assert_eq!(record.messages_per_hour[&0], 1);
    assert_eq!(record.summary.chat_duration_days, 2);
}

#[test]
fn test_single_day_duration_is_one() {
    let record = analyze_str("2024-01-01, 10:00 - Alice: hola", None).unwrap();
    assert_eq!(record.summary.chat_duration_days, 1);
    assert_eq!(record.most_active_days, vec![(day(2024, 1, 1), 1)]);
}

// =========================================================================
// Classification tests
// =========================================================================

#[test]
fn test_empty_body_is_text() {
    let record = analyze_str("2024-01-01, 10:00 - Alice:", None).unwrap();
    assert_eq!(record.message_types_per_participant["Alice"].text, 1);
    assert_eq!(record.word_counts["Alice"], 0);
    assert!(record.avg_message_length["Alice"].abs() < 1e-9);
}

#[test]
fn test_document_with_filename() {
    let record = analyze_str(
        "2024-01-01, 10:00 - Alice: report.pdf • 3 pages document omitted\n\
         2024-01-01, 10:01 - Bob: informe.pdf documento omitido",
        None,
    )
    .unwrap();
    assert_eq!(record.message_types_per_participant["Alice"].document, 1);
    assert_eq!(record.message_types_per_participant["Bob"].document, 1);
}

#[test]
fn test_marker_inside_sentence_is_text() {
    let classifier = Classifier::new(MarkerTable::all());
    let messages = parse("2024-01-01, 10:00 - Alice: the image omitted part was funny");
    assert_eq!(classifier.classify(&messages[0]), MessageType::Text);
}

#[test]
fn test_media_words_do_not_count_as_text_words() {
    let record = analyze_str(
        "2024-01-01, 10:00 - Alice: <sticker omitted>\n\
         2024-01-01, 10:01 - Alice: two words",
        None,
    )
    .unwrap();
    assert_eq!(record.word_counts["Alice"], 2);
    assert_eq!(record.message_types_per_participant["Alice"].sticker, 1);
}

#[test]
fn test_sendered_encryption_notice_is_system() {
    let record = Analysis::new()
        .language(Language::Spanish)
        .run_str(
            "[15/01/24, 10:00:00] Viaje: Los mensajes y las llamadas están cifrados de extremo a extremo.\n\
             [15/01/24, 10:01:00] Ana: hola",
        )
        .unwrap();

    assert_eq!(record.summary.participants, vec!["Ana"]);
    assert_eq!(record.summary.total_messages, 1);
}

#[test]
fn test_system_notices_between_messages_are_skipped() {
    let record = analyze_str(
        "2024-01-01, 10:00 - Alice: hola\n\
         2024-01-01, 10:01 - Alice added Bob\n\
         2024-01-01, 10:02 - Bob: hi",
        None,
    )
    .unwrap();
    assert_eq!(record.summary.total_messages, 2);
    assert!(record.is_consistent());
}

// =========================================================================
// Configuration boundary tests
// =========================================================================

#[test]
fn test_inverted_window_fails() {
    let filter = FilterConfig::new()
        .with_after(day(2024, 2, 1))
        .with_before(day(2024, 1, 1));
    let err = Analysis::new()
        .filter(filter)
        .run_str("2024-01-15, 10:00 - Alice: hola")
        .unwrap_err();
    assert!(err.is_no_messages());
}

#[test]
fn test_inclusive_window_bounds() {
    let record = Analysis::new()
        .after("2024-01-01")
        .unwrap()
        .before("2024-01-01")
        .unwrap()
        .run_str(
            "2023-12-31, 23:59 - Alice: out\n\
             2024-01-01, 00:00 - Alice: in\n\
             2024-01-01, 23:59 - Bob: in\n\
             2024-01-02, 00:00 - Bob: out",
        )
        .unwrap();
    assert_eq!(record.summary.total_messages, 2);
}

#[test]
fn test_malformed_window_date() {
    let err = Analysis::new().after("01/02/2024").unwrap_err();
    assert!(err.is_invalid_date());
}

#[test]
fn test_long_preamble_before_first_message() {
    let mut transcript: String = (0..60).map(|i| format!("preamble noise {i}\n")).collect();
    transcript.push_str("2024-01-01, 10:00 - Alice: hello");

    let record = analyze_str(&transcript, None).unwrap();
    assert_eq!(record.summary.total_messages, 1);
    assert_eq!(record.summary.participants, vec!["Alice"]);
}

#[test]
fn test_month_first_dates_resolved_by_later_lines() {
    // The first fifty lines read equally well as dd/mm and mm/dd.
    let mut lines: Vec<String> = (0..50)
        .map(|i| format!("1/{}/24, 10:{:02} AM - Alice: msg {i}", 1 + i % 10, i))
        .collect();
    lines.extend((0..50).map(|i| format!("1/{}/24, 11:{:02} AM - Bob: msg {i}", 20 + i % 10, i)));

    let record = analyze_str(&lines.join("\n"), None).unwrap();
    assert_eq!(record.summary.total_messages, 100);
    assert_eq!(record.summary.participants, vec!["Alice", "Bob"]);
    assert_eq!(record.summary.date_range.start, day(2024, 1, 1));
    assert_eq!(record.summary.date_range.end, day(2024, 1, 29));
    assert_eq!(record.messages_per_month["2024-01"], 100);
}

#[test]
fn test_large_top_days_returns_every_day() {
    let record = Analysis::with_configs(
        ParserConfig::default(),
        AnalyzerConfig::new().with_top_days(usize::MAX),
    )
    .run_str(
        "2024-01-01, 10:00 - Alice: a\n\
         2024-01-02, 10:00 - Alice: b\n\
         2024-01-02, 11:00 - Alice: c",
    )
    .unwrap();
    assert_eq!(
        record.most_active_days,
        vec![(day(2024, 1, 2), 2), (day(2024, 1, 1), 1)]
    );
}
