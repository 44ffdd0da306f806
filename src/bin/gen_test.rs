//! Synthetic export archive generator for stress testing chatarchive.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output.zip] [style]
//! Example: cargo run --features gen-test --bin gen_test -- 50000 heavy_chat.zip ios
//!
//! Styles: `android` (`05/03/2024, 14:30 - Alice: hi`), `ios`
//! (`[05/03/2024, 14:30:00] Alice: hi`), `us` (`[3/5/24, 2:30:00 PM] Alice: hi`).

use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const EMOJIS: &[&str] = &[
    "😀", "😂", "😍", "🤔", "🙄", "🤯", "🔥", "👍", "❤️", "🏳️‍🌈", "👨‍👩‍👧‍👦", "🤷‍♀️",
];

const AUTHORS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "村上",
    "محمد",
    "Jean-Pierre Dupont",
    "+33 6 12 34 56 78",
    "🔥FireUser🔥",
    "You",
];

const PLACEHOLDERS: &[&str] = &["<Media omitted>", "image omitted", "<Média omis>", "video omitted"];

#[derive(Clone, Copy)]
enum Style {
    Android,
    Ios,
    Us,
}

impl Style {
    fn header(self, ts: NaiveDateTime, author: &str) -> String {
        match self {
            Style::Android => format!("{} - {}: ", ts.format("%d/%m/%Y, %H:%M"), author),
            Style::Ios => format!("[{}] {}: ", ts.format("%d/%m/%Y, %H:%M:%S"), author),
            // Narrow no-break space before the meridiem, as newer iOS builds write it
            Style::Us => format!("[{}] {}: ", ts.format("%-m/%-d/%y, %-I:%M:%S\u{202F}%p"), author),
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("synthetic_chat.zip");
    let style = match args.get(3).map(|s| s.as_str()).unwrap_or("android") {
        "android" => Style::Android,
        "ios" => Style::Ios,
        "us" => Style::Us,
        other => {
            eprintln!("Unknown style: {}. Use 'android', 'ios' or 'us'", other);
            std::process::exit(1);
        }
    };

    println!("🧪 Archive Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!();

    let start = std::time::Instant::now();
    let (transcript, media) = generate_transcript(count, style);

    let file = File::create(output).expect("Failed to create output file");
    let mut zip = ZipWriter::new(BufWriter::with_capacity(1024 * 1024, file));
    let options = SimpleFileOptions::default();

    zip.start_file("_chat.txt", options).expect("Failed to start transcript entry");
    zip.write_all(transcript.as_bytes()).expect("Failed to write transcript");

    for name in &media {
        zip.start_file(format!("media/{name}"), options)
            .expect("Failed to start media entry");
        zip.write_all(b"synthetic media payload")
            .expect("Failed to write media");
    }

    zip.finish().expect("Failed to finish archive");

    let elapsed = start.elapsed();
    println!("✅ Done!");
    println!("   Transcript: {:.2} MB", transcript.len() as f64 / 1_000_000.0);
    println!("   Media:      {} files", media.len());
    println!("   Time:       {:.2}s", elapsed.as_secs_f64());
}

/// Builds the transcript text and the names of the media files it refers to.
fn generate_transcript(count: usize, style: Style) -> (String, Vec<String>) {
    let mut rng = rand::thread_rng();
    let mut out = String::new();
    let mut media = Vec::new();

    out.push_str("Messages and calls are end-to-end encrypted. No one outside of this chat can read them.\n");

    let mut ts = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(8, 0, 0))
        .expect("valid start date");

    for i in 0..count {
        ts += Duration::seconds(rng.gen_range(1..=3_600));
        let author = AUTHORS.choose(&mut rng).expect("authors not empty");
        out.push_str(&style.header(ts, author));

        match i % 10 {
            // Named attachment
            0 => {
                let name = format!("IMG-{}-WA{:04}.jpg", ts.format("%Y%m%d"), i % 10_000);
                out.push_str(&format!("{name} (file attached)"));
                media.push(name);
            }
            // Placeholder with a same-day file for the date fallback
            1 => {
                out.push_str(PLACEHOLDERS.choose(&mut rng).expect("placeholders not empty"));
                media.push(format!("PTT-{}-WA{:04}.opus", ts.format("%Y%m%d"), i % 10_000));
            }
            // Multi-line message
            2 => {
                out.push_str(&format!("Line one of #{i}\nline two\n\nline four"));
            }
            3 => {
                let emojis: String = (0..20)
                    .map(|_| *EMOJIS.choose(&mut rng).expect("emojis not empty"))
                    .collect();
                out.push_str(&format!("Emoji spam: {emojis}"));
            }
            4 => out.push_str(&format!("Кириллица и 日本語 #{i}")),
            5 => out.push_str("Message with a colon: right here"),
            6 => out.push_str(&format!("\u{200E}Left-to-right mark #{i}")),
            _ => out.push_str(&format!("Normal message #{i} with some text")),
        }
        out.push('\n');

        // Occasional garbage between messages; becomes continuation text
        if i % 1000 == 500 {
            out.push_str(garbage_line(&mut rng));
        }
    }

    (out, media)
}

fn garbage_line(rng: &mut impl Rng) -> &'static str {
    match rng.gen_range(0..4) {
        0 => "This line has no timestamp or author\n",
        1 => "[Invalid date format here] - : message\n",
        2 => "-------------------------------------------\n",
        _ => "\n",
    }
}
