//! Message and attachment types.
//!
//! A [`Message`] is produced by the transcript parser once its header and all
//! continuation lines have been read; after that its text never changes. The
//! only later mutation is the attachment linker filling in
//! [`attachments`](Message::attachments), exactly once.
//!
//! # Examples
//!
//! ```
//! use chatarchive::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
//!     .unwrap()
//!     .and_hms_opt(14, 30, 0)
//!     .unwrap();
//! let msg = Message::new(ts, "Alice", "Hello!");
//!
//! assert_eq!(msg.author(), "Alice");
//! assert_eq!(msg.text(), "Hello!");
//! assert!(msg.attachments().is_empty());
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Placeholder bodies written by the export tool when media was left out.
///
/// Matched case-insensitively as substrings of the trimmed body.
pub const MEDIA_OMITTED_PLACEHOLDERS: &[&str] = &[
    "<Media omitted>",
    "<Média omis>",
    "<Média omise>",
    "image omitted",
    "video omitted",
    "image omise",
    "video omise",
];

/// Broad category of a media file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Doc,
}

impl MediaKind {
    pub const IMAGE_EXTENSIONS: &'static [&'static str] =
        &["jpg", "jpeg", "png", "gif", "webp", "heic"];
    pub const VIDEO_EXTENSIONS: &'static [&'static str] =
        &["mp4", "3gp", "mov", "avi", "mkv", "m4v"];
    pub const AUDIO_EXTENSIONS: &'static [&'static str] = &["opus", "ogg", "mp3", "wav", "m4a"];
    pub const DOC_EXTENSIONS: &'static [&'static str] = &[
        "pdf", "txt", "vcf", "csv", "doc", "docx", "xls", "xlsx", "zip",
    ];

    /// Classifies a file path by its (case-insensitive) extension.
    ///
    /// Anything that is not image, video or audio is a document.
    pub fn from_path(path: &Path) -> Self {
        let ext = extension_lowercase(path);
        let ext = ext.as_deref().unwrap_or_default();

        if Self::IMAGE_EXTENSIONS.contains(&ext) {
            MediaKind::Image
        } else if Self::VIDEO_EXTENSIONS.contains(&ext) {
            MediaKind::Video
        } else if Self::AUDIO_EXTENSIONS.contains(&ext) {
            MediaKind::Audio
        } else {
            MediaKind::Doc
        }
    }

    /// Returns `true` if the path has an extension the media catalog indexes.
    pub fn is_catalogued(path: &Path) -> bool {
        let Some(ext) = extension_lowercase(path) else {
            return false;
        };
        let ext = ext.as_str();
        Self::IMAGE_EXTENSIONS.contains(&ext)
            || Self::VIDEO_EXTENSIONS.contains(&ext)
            || Self::AUDIO_EXTENSIONS.contains(&ext)
            || Self::DOC_EXTENSIONS.contains(&ext)
    }

    /// Filename-only label used when a file cannot be shown inline.
    ///
    /// ```
    /// use chatarchive::MediaKind;
    ///
    /// assert_eq!(MediaKind::Audio.placeholder("PTT-20240305-WA0002.opus"), "[AUDIO] PTT-20240305-WA0002.opus");
    /// ```
    pub fn placeholder(self, filename: &str) -> String {
        format!("[{}] {}", self.label(), filename)
    }

    fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "IMAGE",
            MediaKind::Video => "VIDEO",
            MediaKind::Audio => "AUDIO",
            MediaKind::Doc => "DOC",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Doc => write!(f, "doc"),
        }
    }
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// A media file linked to the message that sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Path relative to the media root of the archive it was linked in.
    pub relative_path: PathBuf,

    /// Kind derived from the extension when the file was catalogued.
    pub kind: MediaKind,

    /// Bare file name.
    pub filename: String,

    /// Absolute location on disk.
    ///
    /// Kept alongside the relative path so attachments stay resolvable after
    /// conversations from different archives are merged.
    pub path: PathBuf,
}

impl Attachment {
    /// Creates an attachment for `path`, located under `media_root`.
    ///
    /// Files outside `media_root` keep their bare file name as relative path.
    pub fn new(path: impl Into<PathBuf>, media_root: &Path, kind: MediaKind) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_path = path
            .strip_prefix(media_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(&filename));

        Self {
            relative_path,
            kind,
            filename,
            path,
        }
    }

    /// Returns `true` if the underlying file can currently be opened.
    pub fn is_readable(&self) -> bool {
        std::fs::File::open(&self.path).is_ok()
    }

    /// Returns the filename-only label for this attachment.
    pub fn placeholder(&self) -> String {
        self.kind.placeholder(&self.filename)
    }
}

/// One chat message reconstructed from a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    timestamp: NaiveDateTime,
    author: String,
    text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment>,
}

impl Message {
    /// Creates a message with no attachments.
    pub fn new(timestamp: NaiveDateTime, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            author: author.into(),
            text: text.into(),
            attachments: Vec::new(),
        }
    }

    /// Builder method to attach files up front.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Naive local time of the header, relative to the exporting device.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the body, continuation lines joined with `\n`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the linked attachments in link order.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub(crate) fn push_attachment(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    /// Returns `true` if the body is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns `true` if the body is empty or a "media omitted" placeholder.
    ///
    /// ```
    /// use chatarchive::Message;
    /// use chrono::NaiveDateTime;
    ///
    /// let ts = NaiveDateTime::default();
    /// assert!(Message::new(ts, "Bob", "<Media omitted>").is_media_placeholder());
    /// assert!(Message::new(ts, "Bob", "  ").is_media_placeholder());
    /// assert!(!Message::new(ts, "Bob", "see you").is_media_placeholder());
    /// ```
    pub fn is_media_placeholder(&self) -> bool {
        let body = self.text.trim().to_lowercase();
        body.is_empty()
            || MEDIA_OMITTED_PLACEHOLDERS
                .iter()
                .any(|token| body.contains(&token.to_lowercase()))
    }
}
