//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::MessageType;
use crate::config::OutputConfig;
use crate::core::analytics::AnalyticsRecord;
use crate::error::Result;

const HEADER: [&str; 10] = [
    "participant",
    "messages",
    "words",
    "avg_length",
    "text",
    "image",
    "sticker",
    "audio",
    "video",
    "document",
];

/// Writes the per-participant table of a record to a CSV file.
///
/// # Format
/// - Delimiter: [`OutputConfig::csv_delimiter`] (`;` by default)
/// - Columns: `participant;messages;words;avg_length;text;image;sticker;audio;video;document`
/// - One row per participant, in order of first appearance
/// - Encoding: UTF-8
pub fn write_csv(
    record: &AnalyticsRecord,
    output_path: impl AsRef<Path>,
    config: &OutputConfig,
) -> Result<()> {
    let file = File::create(output_path)?;
    write_table(record, file, config)
}

/// Converts the per-participant table of a record to a CSV string.
pub fn to_csv(record: &AnalyticsRecord, config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_table(record, &mut buffer, config)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_table<W: Write>(record: &AnalyticsRecord, out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.csv_delimiter)
        .from_writer(out);

    writer.write_record(HEADER)?;
    for participant in &record.summary.participants {
        writer.write_record(build_row(record, participant))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_row(record: &AnalyticsRecord, participant: &str) -> Vec<String> {
    let types = record
        .message_types_per_participant
        .get(participant)
        .copied()
        .unwrap_or_default();

    let mut row = vec![
        participant.to_string(),
        record
            .messages_per_participant
            .get(participant)
            .copied()
            .unwrap_or(0)
            .to_string(),
        record
            .word_counts
            .get(participant)
            .copied()
            .unwrap_or(0)
            .to_string(),
        record
            .avg_message_length
            .get(participant)
            .copied()
            .unwrap_or(0.0)
            .to_string(),
    ];
    row.extend(MessageType::COUNTED.iter().map(|&k| types.get(k).to_string()));
    row
}
