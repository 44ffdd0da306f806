//! Export view of conversations.
//!
//! Writers never touch [`Message`] directly: they render [`ExportMessage`]
//! records, which resolve presentation details (side, author visibility,
//! attachment availability) once, from an [`OutputConfig`].

use serde::Serialize;

use crate::Message;
use crate::conversation::{Conversation, DEFAULT_SELF_NAMES, Side};
use crate::message::{Attachment, MediaKind};

/// Timestamp layout used in every export.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Configuration for exports.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Authors placed on the right (the local user)
    pub self_names: Vec<String>,
    /// Show author names; `None` decides per conversation
    pub show_authors: Option<bool>,
    /// Include attachment records
    pub include_attachments: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            self_names: DEFAULT_SELF_NAMES.iter().map(|s| (*s).to_string()).collect(),
            show_authors: None,
            include_attachments: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name for the local user, ahead of the defaults.
    #[must_use]
    pub fn with_self_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let name = name.trim();
        if !name.is_empty() {
            self.self_names.insert(0, name.to_string());
        }
        self
    }

    #[must_use]
    pub fn with_show_authors(mut self, show: bool) -> Self {
        self.show_authors = Some(show);
        self
    }

    #[must_use]
    pub fn without_attachments(mut self) -> Self {
        self.include_attachments = false;
        self
    }

    /// Resolves author visibility for `conversation`.
    pub fn shows_authors(&self, conversation: &Conversation) -> bool {
        self.show_authors
            .unwrap_or_else(|| conversation.show_authors_by_default())
    }

    pub fn side_of(&self, author: &str) -> Side {
        Side::of(author, &self.self_names)
    }
}

/// An attachment as it appears in an export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportAttachment {
    pub filename: String,
    pub kind: MediaKind,
    /// Absolute path, only when the file could be opened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Filename-only label, e.g. `[IMAGE] IMG-20240305-WA0001.jpg`
    pub label: String,
}

impl ExportAttachment {
    /// Checks the file on disk; unreadable files keep only their label.
    pub fn resolve(attachment: &Attachment) -> Self {
        let path = attachment
            .is_readable()
            .then(|| attachment.path.display().to_string());
        Self {
            filename: attachment.filename.clone(),
            kind: attachment.kind,
            path,
            label: attachment.placeholder(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// A message as it appears in an export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportMessage {
    pub timestamp: String,
    pub author: String,
    pub side: Side,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<ExportAttachment>,
}

impl ExportMessage {
    pub fn from_message(msg: &Message, config: &OutputConfig) -> Self {
        let attachments = if config.include_attachments {
            msg.attachments().iter().map(ExportAttachment::resolve).collect()
        } else {
            Vec::new()
        };
        Self {
            timestamp: msg.timestamp().format(EXPORT_TIMESTAMP_FORMAT).to_string(),
            author: msg.author().to_string(),
            side: config.side_of(msg.author()),
            text: msg.text().to_string(),
            attachments,
        }
    }
}

/// A whole conversation as it appears in an export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportConversation {
    pub id: String,
    pub title: String,
    pub show_authors: bool,
    pub messages: Vec<ExportMessage>,
}

impl ExportConversation {
    pub fn from_conversation(conversation: &Conversation, config: &OutputConfig) -> Self {
        Self {
            id: conversation.id().to_string(),
            title: conversation.title().to_string(),
            show_authors: config.shows_authors(conversation),
            messages: conversation
                .messages()
                .iter()
                .map(|m| ExportMessage::from_message(m, config))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::tempdir;

    fn ts() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_self_name_goes_right() {
        let config = OutputConfig::new().with_self_name("  Manon ");
        assert_eq!(config.side_of("Manon"), Side::Right);
        assert_eq!(config.side_of("Moi"), Side::Right);
        assert_eq!(config.side_of("Alice"), Side::Left);

        let unchanged = OutputConfig::new().with_self_name("   ");
        assert_eq!(unchanged.self_names.len(), DEFAULT_SELF_NAMES.len());
    }

    #[test]
    fn test_unreadable_attachment_degrades_to_label() {
        let att = Attachment::new("/nowhere/IMG-1.jpg", Path::new("/nowhere"), MediaKind::Image);
        let exported = ExportAttachment::resolve(&att);
        assert!(!exported.is_available());
        assert_eq!(exported.label, "[IMAGE] IMG-1.jpg");
    }

    #[test]
    fn test_readable_attachment_keeps_path() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("doc.pdf");
        std::fs::write(&file, "pdf").unwrap();

        let att = Attachment::new(&file, dir.path(), MediaKind::Doc);
        let exported = ExportAttachment::resolve(&att);
        assert_eq!(exported.path.as_deref(), Some(file.display().to_string().as_str()));
    }

    #[test]
    fn test_export_message_fields() {
        let msg = Message::new(ts(), "You", "hi");
        let exported = ExportMessage::from_message(&msg, &OutputConfig::new());
        assert_eq!(exported.timestamp, "05/03/2024 14:30");
        assert_eq!(exported.side, Side::Right);
    }

    #[test]
    fn test_show_authors_override() {
        let conv = Conversation::new("x", vec![Message::new(ts(), "A", "")], "/");
        assert!(!OutputConfig::new().shows_authors(&conv));
        assert!(OutputConfig::new().with_show_authors(true).shows_authors(&conv));
    }
}
