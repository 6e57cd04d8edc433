//! Synthetic WhatsApp transcript generator for stress testing chatstats.
//!
//! Usage: cargo run --features gen-test --bin gen_transcript -- [messages] [output] [es|en] [seed]
//! Example: cargo run --features gen-test --bin gen_transcript -- 100000 heavy_chat.txt es 7

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SENDERS: &[&str] = &[
    "Alice",
    "Bob",
    "María José",
    "Иван",
    "村上",
    "محمد",
    "🔥FireUser🔥",
    "+34 600 12 34 56",
    "Ana: la del gym",
];

const TEXTS: &[&str] = &[
    "hola",
    "¿quedamos mañana?",
    "ok",
    "jajajaja",
    "Kiedy wracasz?",
    "Mixed: Hello Привет 你好 🌍",
    "link: https://example.com/a?b=c:d",
    "10:30 - not a header",
    "😂😂😂",
];

#[derive(Clone, Copy)]
enum Style {
    Spanish,
    English,
}

impl Style {
    fn header(self, ts: NaiveDateTime) -> String {
        match self {
            Style::Spanish => format!("[{}]", ts.format("%d/%m/%y, %H:%M:%S")),
            Style::English => format!("{} -", ts.format("%-m/%-d/%y, %-I:%M %p")),
        }
    }

    fn markers(self) -> &'static [&'static str] {
        match self {
            Style::Spanish => &[
                "imagen omitida",
                "sticker omitido",
                "audio omitido",
                "video omitido",
                "documento omitido",
            ],
            Style::English => &[
                "<image omitted>",
                "<sticker omitted>",
                "<audio omitted>",
                "<video omitted>",
                "<document omitted>",
            ],
        }
    }

    fn notice(self) -> &'static str {
        match self {
            Style::Spanish => "Los mensajes y las llamadas están cifrados de extremo a extremo.",
            Style::English => "Messages and calls are end-to-end encrypted.",
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_chat.txt", String::as_str);
    let style = match args.get(3).map(String::as_str) {
        Some("en") => Style::English,
        Some("es") | None => Style::Spanish,
        Some(other) => {
            eprintln!("Unknown style: {other}. Use 'es' or 'en'");
            std::process::exit(1);
        }
    };
    let seed: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(42);

    eprintln!("Transcript generator");
    eprintln!("   Messages: {count}");
    eprintln!("   Output:   {output}");

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = StdRng::seed_from_u64(seed);

    let start = std::time::Instant::now();
    let mut bytes_written = 0usize;
    let mut ts = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap_or_default();

    let first = format!("{} {}\n", style.header(ts), style.notice());
    bytes_written += first.len();
    writer.write_all(first.as_bytes())?;

    for i in 0..count {
        ts += Duration::seconds(rng.gen_range(1..7200));
        let sender = SENDERS.choose(&mut rng).copied().unwrap_or("Alice");
        let body = generate_body(&mut rng, style, i);

        let line = format!("{} {}: {}\n", style.header(ts), sender, body);
        bytes_written += line.len();
        writer.write_all(line.as_bytes())?;

        if (i + 1) % 10_000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    eprintln!();
    eprintln!("Done: {:.2} MB in {:.2}s", bytes_written as f64 / 1_000_000.0, elapsed.as_secs_f64());
    Ok(())
}

fn generate_body(rng: &mut impl Rng, style: Style, index: usize) -> String {
    match index % 12 {
        0..=5 => TEXTS.choose(rng).copied().unwrap_or("hola").to_string(),
        6 | 7 => style.markers().choose(rng).copied().unwrap_or_default().to_string(),
        8 => format!("first line #{index}\nsecond line\n\nafter a blank"),
        9 => "x".repeat(rng.gen_range(200..5000)),
        10 => String::new(),
        _ => format!("message #{index}"),
    }
}
