//! Benchmarks for chatarchive parsing, linking and export.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench parsing -- transcript`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chatarchive::core::output::{to_csv, to_json, to_txt};
use chatarchive::core::{FilterConfig, OutputConfig, apply_filters};
use chatarchive::media::{AttachmentLinker, MediaCatalog};
use chatarchive::parser::TranscriptParser;
use chatarchive::parsing::{LineClassifier, resolve_timestamp};
use chatarchive::{Conversation, Message};

use chrono::{Duration, NaiveDate, NaiveDateTime};

// =============================================================================
// Test Data Generators
// =============================================================================

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .unwrap()
}

fn generate_android_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let author = if i % 2 == 0 { "Alice" } else { "Bob" };
        let ts = base_time() + Duration::minutes(i as i64);
        lines.push(format!(
            "{} - {}: Message number {}",
            ts.format("%d/%m/%Y, %H:%M"),
            author,
            i
        ));
        if i % 5 == 0 {
            lines.push("a continuation line".to_string());
        }
    }
    lines.join("\n")
}

fn generate_ios_txt(count: usize) -> String {
    let mut lines = Vec::with_capacity(count);
    for i in 0..count {
        let author = if i % 2 == 0 { "Alice" } else { "Bob" };
        let ts = base_time() + Duration::minutes(i as i64);
        lines.push(format!(
            "\u{200E}[{}] {}: Message number {}",
            ts.format("%-m/%-d/%y, %-I:%M:%S\u{202F}%p"),
            author,
            i
        ));
    }
    lines.join("\n")
}

fn generate_messages(count: usize) -> Vec<Message> {
    (0..count)
        .map(|i| {
            let author = if i % 2 == 0 { "Alice" } else { "Bob" };
            let ts = base_time() + Duration::minutes(i as i64);
            let text = if i % 10 == 0 {
                format!("IMG-{}-WA{:04}.jpg (file attached)", ts.format("%Y%m%d"), i)
            } else if i % 10 == 1 {
                "<Media omitted>".to_string()
            } else {
                format!("Message number {}", i)
            };
            Message::new(ts, author, text)
        })
        .collect()
}

fn generate_catalog(messages: &[Message]) -> MediaCatalog {
    let paths = messages.iter().enumerate().filter(|(i, _)| i % 10 < 2).map(|(i, m)| {
        format!("/media/IMG-{}-WA{:04}.jpg", m.timestamp().format("%Y%m%d"), i)
    });
    MediaCatalog::from_paths("/media", paths)
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_transcript_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("transcript_parsing");
    let parser = TranscriptParser::new();

    for size in [100_usize, 1_000, 10_000, 50_000] {
        let android = generate_android_txt(size);
        let ios = generate_ios_txt(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("android", size), &android, |b, txt| {
            b.iter(|| black_box(parser.parse_str(black_box(txt))));
        });
        group.bench_with_input(BenchmarkId::new("ios", size), &ios, |b, txt| {
            b.iter(|| black_box(parser.parse_str(black_box(txt))));
        });
    }
    group.finish();
}

fn bench_line_classifier(c: &mut Criterion) {
    let classifier = LineClassifier::new();
    let lines = [
        "[05/03/2024, 14:30:00] Alice: Hello",
        "[3/5/24, 2:30:00 PM] Bob: Hi",
        "05/03/2024, 14:30 - Alice: Hello",
        "just a continuation line without any header",
    ];
    c.bench_function("line_classifier", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(classifier.classify(black_box(line)));
            }
        });
    });
}

fn bench_timestamp_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("timestamp_resolution");
    // Best case hits the first format, worst case falls through to the last
    group.bench_function("day_first_24h", |b| {
        b.iter(|| resolve_timestamp(black_box("05/03/2024"), black_box("14:30:00")));
    });
    group.bench_function("month_first_12h", |b| {
        b.iter(|| resolve_timestamp(black_box("1/15/24"), black_box("2:30 PM")));
    });
    group.bench_function("unresolvable", |b| {
        b.iter(|| resolve_timestamp(black_box("32/13/2024"), black_box("99:99")));
    });
    group.finish();
}

// =============================================================================
// Linking and Filtering Benchmarks
// =============================================================================

fn bench_attachment_linking(c: &mut Criterion) {
    let mut group = c.benchmark_group("attachment_linking");
    let linker = AttachmentLinker::new();

    for size in [100_usize, 1_000, 10_000] {
        let messages = generate_messages(size);
        let catalog = generate_catalog(&messages);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| {
                let mut messages = messages.clone();
                black_box(linker.link(&mut messages, black_box(&catalog)));
                black_box(messages)
            });
        });
    }
    group.finish();
}

fn bench_filter_by_author(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_author");

    for size in [100_usize, 1_000, 10_000, 100_000] {
        let messages = generate_messages(size);
        let config = FilterConfig::new().with_author("Alice");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, messages| {
            b.iter(|| black_box(apply_filters(black_box(messages.clone()), &config)));
        });
    }
    group.finish();
}

// =============================================================================
// Output Benchmarks
// =============================================================================

fn bench_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("output");
    let config = OutputConfig::default();

    for size in [100_usize, 1_000, 10_000] {
        let conversation = Conversation::new("Bench", generate_messages(size), "/media");
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("json", size), &conversation, |b, conv| {
            b.iter(|| black_box(to_json(black_box(conv), &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("csv", size), &conversation, |b, conv| {
            b.iter(|| black_box(to_csv(black_box(conv), &config).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("txt", size), &conversation, |b, conv| {
            b.iter(|| black_box(to_txt(black_box(conv), &config).unwrap()));
        });
    }
    group.finish();
}

// =============================================================================
// End-to-End Pipeline Benchmark
// =============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let parser = TranscriptParser::new();
    let linker = AttachmentLinker::new();
    let output_config = OutputConfig::default();

    for size in [1_000_usize, 10_000] {
        let txt = generate_android_txt(size);
        let catalog = generate_catalog(&generate_messages(size));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &txt, |b, txt| {
            b.iter(|| {
                // parse -> link -> assemble -> export
                let mut messages = parser.parse_str(black_box(txt));
                linker.link(&mut messages, &catalog);
                let conversation = Conversation::new("Bench", messages, "/media");
                black_box(to_json(&conversation, &output_config).unwrap())
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_transcript_parsing,
    bench_line_classifier,
    bench_timestamp_resolution,
    bench_attachment_linking,
    bench_filter_by_author,
    bench_output,
    bench_full_pipeline,
);

criterion_main!(benches);
