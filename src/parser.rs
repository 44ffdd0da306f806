//! Transcript parsing: from raw text to time-ordered messages.
//!
//! [`TranscriptParser`] drives the line primitives from [`crate::parsing`]
//! over a whole transcript. It is a two-state machine: before the first
//! header every line is banner noise and is dropped; afterwards each
//! non-header line extends the message currently being built.
//!
//! # Example
//!
//! ```rust
//! use chatarchive::parser::TranscriptParser;
//!
//! let transcript = "\
//! Messages to this chat are now secured.
//! 05/03/2024, 14:30 - Alice: Hello
//! how are you?
//! 05/03/2024, 14:31 - Bob: Fine!";
//!
//! let messages = TranscriptParser::new().parse_str(transcript);
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].text(), "Hello\nhow are you?");
//! assert_eq!(messages[1].author(), "Bob");
//! ```

use std::path::Path;
use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::Message;
use crate::archive::read_transcript;
use crate::config::{ParseConfig, TimestampFallback};
use crate::error::Result;
use crate::parsing::{HeaderMatch, LineClassifier, normalize_line, resolve_timestamp};

/// Title used when nothing usable can be derived from file names.
pub const DEFAULT_TITLE: &str = "WhatsApp Chat";

/// Generic transcript stem used by iOS exports (`_chat.txt`).
const GENERIC_TRANSCRIPT_STEM: &str = "_chat";

static TITLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:WhatsApp Chat with|WhatsApp Chat -|Discussion WhatsApp avec)\s+")
        .expect("title prefix pattern is valid")
});

/// Counters collected while parsing one transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines read, including blank ones
    pub lines: usize,
    /// Lines recognized as message headers
    pub headers: usize,
    /// Lines appended to an open message
    pub continuation_lines: usize,
    /// Lines dropped before the first header or after a discarded one
    pub dropped_lines: usize,
    /// Headers whose date/time could not be resolved
    pub unresolved_timestamps: usize,
}

/// A parsed transcript: its title and its messages in timestamp order.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub title: String,
    pub messages: Vec<Message>,
    pub stats: ParseStats,
}

/// Accumulates one message while its continuation lines are read.
struct MessageBuilder {
    timestamp: NaiveDateTime,
    author: String,
    text: String,
}

impl MessageBuilder {
    fn open(timestamp: NaiveDateTime, header: &HeaderMatch<'_>) -> Self {
        Self {
            timestamp,
            author: header.author.to_string(),
            text: header.body.to_string(),
        }
    }

    fn push_line(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
    }

    fn finish(self) -> Message {
        Message::new(self.timestamp, self.author, self.text)
    }
}

/// Parser for plain-text chat transcripts.
pub struct TranscriptParser {
    config: ParseConfig,
    classifier: LineClassifier,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParseConfig::default())
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParseConfig) -> Self {
        Self {
            config,
            classifier: LineClassifier::new(),
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parses transcript text into messages sorted by timestamp.
    ///
    /// Never fails: lines that are not headers become continuation text or
    /// are dropped.
    pub fn parse_str(&self, content: &str) -> Vec<Message> {
        self.parse_with_stats(content).0
    }

    /// Same as [`parse_str`](Self::parse_str), also returning counters.
    pub fn parse_with_stats(&self, content: &str) -> (Vec<Message>, ParseStats) {
        let mut stats = ParseStats::default();
        let mut messages: Vec<Message> = Vec::new();
        let mut current: Option<MessageBuilder> = None;
        let mut last_timestamp: Option<NaiveDateTime> = None;

        for raw in split_lines(content) {
            stats.lines += 1;
            let line = normalize_line(raw);

            let Some(header) = self.classifier.classify(&line) else {
                match current.as_mut() {
                    Some(builder) => {
                        builder.push_line(&line);
                        stats.continuation_lines += 1;
                    }
                    None => stats.dropped_lines += 1,
                }
                continue;
            };

            stats.headers += 1;
            if let Some(done) = current.take() {
                messages.push(done.finish());
            }

            let timestamp = match resolve_timestamp(header.date, header.time) {
                Some(ts) => ts,
                None => {
                    stats.unresolved_timestamps += 1;
                    warn!(
                        date = header.date,
                        time = header.time,
                        policy = %self.config.timestamp_fallback,
                        "unresolvable header timestamp"
                    );
                    match self.config.timestamp_fallback {
                        TimestampFallback::WallClock => Local::now().naive_local(),
                        TimestampFallback::PreviousMessage => {
                            last_timestamp.unwrap_or_else(|| Local::now().naive_local())
                        }
                        TimestampFallback::Discard => continue,
                    }
                }
            };

            last_timestamp = Some(timestamp);
            current = Some(MessageBuilder::open(timestamp, &header));
        }

        if let Some(done) = current {
            messages.push(done.finish());
        }

        // Stable: equal timestamps keep transcript order
        messages.sort_by_key(Message::timestamp);

        debug!(
            lines = stats.lines,
            messages = messages.len(),
            dropped = stats.dropped_lines,
            unresolved = stats.unresolved_timestamps,
            "parsed transcript"
        );

        (messages, stats)
    }

    /// Reads, decodes and parses a transcript file.
    ///
    /// The title comes from the file name, or from `archive` when the
    /// transcript has a generic name; see [`transcript_title`].
    pub fn parse_file(&self, path: &Path, archive: Option<&Path>) -> Result<Transcript> {
        let content = read_transcript(path)?;
        let (messages, stats) = self.parse_with_stats(&content);
        Ok(Transcript {
            title: transcript_title(path, archive),
            messages,
            stats,
        })
    }
}

impl Default for TranscriptParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a conversation title from a file stem.
///
/// Strips the "chat with" prefixes exporters put in front of the contact
/// name and turns underscores into spaces.
///
/// ```
/// use chatarchive::parser::title_from_stem;
///
/// assert_eq!(title_from_stem("WhatsApp Chat with Jane_Doe"), "Jane Doe");
/// assert_eq!(title_from_stem("Discussion WhatsApp avec Manon"), "Manon");
/// assert_eq!(title_from_stem(""), "WhatsApp Chat");
/// ```
pub fn title_from_stem(stem: &str) -> String {
    let title = TITLE_PREFIX.replace(stem.trim(), "").replace('_', " ");
    let title = title.trim();
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Derives the title for a transcript.
///
/// iOS exports name every transcript `_chat.txt`; for those the archive's
/// own name is used when known.
pub fn transcript_title(transcript: &Path, archive: Option<&Path>) -> String {
    let stem = file_stem(transcript);
    if stem.eq_ignore_ascii_case(GENERIC_TRANSCRIPT_STEM) {
        if let Some(archive_stem) = archive.map(file_stem).filter(|s| !s.is_empty()) {
            return title_from_stem(&archive_stem);
        }
    }
    title_from_stem(&stem)
}

/// Splits on `\r\n`, `\n` and a lone `\r`, without a trailing empty line.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let body = content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix(['\n', '\r']))
        .unwrap_or(content);
    let mut rest = (!content.is_empty()).then_some(body);
    std::iter::from_fn(move || {
        let current = rest?;
        match current.find(['\n', '\r']) {
            Some(at) => {
                let skip = if current[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = Some(&current[at + skip..]);
                Some(&current[..at])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
