//! Heuristic linking of media files to messages.
//!
//! Transcripts rarely say which file a message carried. Two passes recover
//! what they can:
//!
//! 1. **References**: filenames quoted in the message body (`IMG-20240305-WA0001.jpg
//!    (file attached)`) are looked up in the catalog.
//! 2. **Date fallback**: a message with an empty or "media omitted" body and
//!    no reference gets the first unclaimed file whose name carries the
//!    message's own date (`-YYYYMMDD-WA`).
//!
//! A file is attached to at most one message. Both passes share one
//! [`ClaimSet`] and walk messages in timestamp order, so earlier messages
//! win.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::catalog::MediaCatalog;
use crate::config::LinkConfig;
use crate::message::{Attachment, Message};

/// Device capture naming: `IMG-20240305-WA0001.jpg`.
static CAPTURE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_-]+-\d{8}-WA\d+\.[A-Za-z0-9]{1,5})").expect("capture name pattern is valid")
});

/// Any filename with a known media extension.
static MEDIA_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([\w.\-]+\.(?:jpg|jpeg|png|gif|mp4|3gp|mov|avi|mkv|m4v|opus|ogg|mp3|wav|m4a|pdf|webp|heic|docx?|xlsx?|zip))",
    )
    .expect("media filename pattern is valid")
});

static DATED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*-(\d{8})-WA\d+\.[A-Za-z0-9]{1,5}$").expect("dated name pattern is valid")
});

/// Filenames already attached during one linking run.
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    claimed: HashSet<String>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `filename` as claimed. Returns `false` if it already was.
    pub fn claim(&mut self, filename: &str) -> bool {
        self.claimed.insert(filename.to_string())
    }

    pub fn is_claimed(&self, filename: &str) -> bool {
        self.claimed.contains(filename)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Outcome of one linking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    /// Files attached because the body named them
    pub by_reference: usize,
    /// Files attached by the date fallback
    pub by_date: usize,
    /// Catalogued files left without a message
    pub unclaimed: usize,
}

impl LinkReport {
    pub fn linked(&self) -> usize {
        self.by_reference + self.by_date
    }
}

/// Returns the distinct filenames referenced in `text`, in order of first
/// appearance. Capture-style names come before generic ones.
///
/// ```
/// use chatarchive::media::referenced_filenames;
///
/// let names = referenced_filenames("IMG-20240305-WA0001.jpg (file attached) and report.PDF");
/// assert_eq!(names, ["IMG-20240305-WA0001.jpg", "report.PDF"]);
/// ```
pub fn referenced_filenames(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for pattern in [&*CAPTURE_NAME, &*MEDIA_FILENAME] {
        for m in pattern.find_iter(text) {
            if seen.insert(m.as_str()) {
                names.push(m.as_str().to_string());
            }
        }
    }
    names
}

/// Extracts the capture date encoded in a device-style filename.
///
/// ```
/// use chatarchive::media::date_from_filename;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     date_from_filename("IMG-20240305-WA0001.jpg"),
///     NaiveDate::from_ymd_opt(2024, 3, 5)
/// );
/// assert_eq!(date_from_filename("holiday.jpg"), None);
/// ```
pub fn date_from_filename(filename: &str) -> Option<NaiveDate> {
    let caps = DATED_NAME.captures(filename)?;
    NaiveDate::parse_from_str(&caps[1], "%Y%m%d").ok()
}

/// Assigns catalogued media files to messages.
#[derive(Debug, Clone, Default)]
pub struct AttachmentLinker {
    config: LinkConfig,
}

impl AttachmentLinker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LinkConfig) -> Self {
        Self { config }
    }

    /// Links `catalog` entries to `messages`, which must already be in
    /// timestamp order.
    pub fn link(&self, messages: &mut [Message], catalog: &MediaCatalog) -> LinkReport {
        let mut claims = ClaimSet::new();
        let by_reference = link_references(messages, catalog, &mut claims);
        let by_date = if self.config.date_fallback {
            link_by_date(messages, catalog, &mut claims)
        } else {
            0
        };

        let report = LinkReport {
            by_reference,
            by_date,
            unclaimed: catalog.len() - claims.len(),
        };
        debug!(
            by_reference = report.by_reference,
            by_date = report.by_date,
            unclaimed = report.unclaimed,
            "linked attachments"
        );
        report
    }
}

fn attach(message: &mut Message, catalog: &MediaCatalog, filename: &str, claims: &mut ClaimSet) -> bool {
    let Some(entry) = catalog.get(filename) else {
        return false;
    };
    if !claims.claim(filename) {
        return false;
    }
    message.push_attachment(Attachment::new(entry.path.clone(), catalog.root(), entry.kind));
    true
}

fn link_references(messages: &mut [Message], catalog: &MediaCatalog, claims: &mut ClaimSet) -> usize {
    let mut linked = 0;
    for message in messages.iter_mut() {
        for filename in referenced_filenames(message.text()) {
            if attach(message, catalog, &filename, claims) {
                linked += 1;
            }
        }
    }
    linked
}

fn link_by_date(messages: &mut [Message], catalog: &MediaCatalog, claims: &mut ClaimSet) -> usize {
    let mut linked = 0;
    for message in messages.iter_mut() {
        if !message.attachments().is_empty() || !message.is_media_placeholder() {
            continue;
        }
        let day = message.timestamp().date();
        let candidate = catalog
            .iter()
            .map(|(name, _)| name)
            .find(|name| !claims.is_claimed(name) && date_from_filename(name) == Some(day));

        if let Some(name) = candidate {
            if attach(message, catalog, name, claims) {
                linked += 1;
            }
        }
    }
    linked
}
