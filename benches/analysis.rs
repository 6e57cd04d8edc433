//! Benchmarks for chatstats parsing, aggregation and output.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench analysis -- aggregate`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatstats::analyze_str;
use chatstats::classify::Classifier;
use chatstats::config::{AnalyzerConfig, OutputConfig};
use chatstats::core::aggregate::aggregate;
use chatstats::core::anonymize::anonymize;
use chatstats::core::output::{to_csv, to_json};
use chatstats::parser::Parser;
use chatstats::parsers::WhatsAppParser;
use rand::SeedableRng;
use rand::rngs::StdRng;

// =============================================================================
// Test Data Generators
// =============================================================================

const BODIES: [&str; 6] = [
    "Message with a few words",
    "imagen omitida",
    "<image omitted>",
    "audio omitido",
    "line one\nline two",
    "",
];

fn generate_bracketed(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = ["Alice", "Bob", "Carol", "Dave"][i % 4];
        let day = (i / 500) % 28 + 1;
        let month = (i / 14_000) % 12 + 1;
        lines.push(format!(
            "[{:02}/{:02}/24, {:02}:{:02}:00] {}: {} #{}",
            day,
            month,
            i % 24,
            i % 60,
            sender,
            BODIES[i % BODIES.len()],
            i
        ));
    }
    lines.join("\n")
}

fn generate_us_dash(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let sender = if i % 2 == 0 { "Alice" } else { "Bob" };
        lines.push(format!(
            "{}/15/24, {}:{:02} {} - {}: Message number {}",
            i % 12 + 1,
            i % 12 + 1,
            i % 60,
            if i % 3 == 0 { "AM" } else { "PM" },
            sender,
            i
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    let parser = WhatsAppParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let bracketed = generate_bracketed(size);
        let us = generate_us_dash(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("bracketed", size), &bracketed, |b, txt| {
            b.iter(|| black_box(parser.parse_str(black_box(txt)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("us_dash", size), &us, |b, txt| {
            b.iter(|| black_box(parser.parse_str(black_box(txt)).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Pipeline Benchmarks
// =============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let parser = WhatsAppParser::new();
    let classifier = Classifier::for_language(None);
    let config = AnalyzerConfig::default();

    for size in [1_000_usize, 10_000, 100_000] {
        let mut messages = parser.parse_str(&generate_bracketed(size)).unwrap();
        classifier.classify_all(&mut messages);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| black_box(aggregate(black_box(messages), &config).unwrap()));
        });
    }

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");

    for size in [1_000_usize, 10_000, 50_000] {
        let txt = generate_bracketed(size);
        group.throughput(Throughput::Bytes(txt.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| black_box(analyze_str(black_box(txt), None).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Output and Pseudonymization Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let record = analyze_str(&generate_bracketed(10_000), None).unwrap();
    let config = OutputConfig::new();

    c.bench_function("to_json", |b| {
        b.iter(|| black_box(to_json(black_box(&record), &config).unwrap()));
    });
    c.bench_function("to_csv", |b| {
        b.iter(|| black_box(to_csv(black_box(&record), &config).unwrap()));
    });
    c.bench_function("anonymize", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| black_box(anonymize(black_box(&record), &mut rng).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_parsing,
    bench_aggregate,
    bench_end_to_end,
    bench_output
);
criterion_main!(benches);
