//! Conversations and the library that merges them.
//!
//! A [`Conversation`] is what one archive becomes once parsed and linked.
//! Its id is a filesystem-safe slug of the title, so exporting the same
//! chat twice (say, before and after a phone change) yields the same id and
//! the [`ConversationLibrary`] folds both into one timeline.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::Message;

/// Default cap on the length of a conversation id.
pub const DEFAULT_SLUG_MAX_LEN: usize = 80;

/// Id used when a title has no usable characters.
pub const FALLBACK_SLUG: &str = "chat";

/// Author names treated as the local user when no others are given.
pub const DEFAULT_SELF_NAMES: &[&str] = &["You", "Vous", "Moi"];

static UNSAFE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]+").expect("slug pattern is valid"));

/// Turns a title into an id made of ASCII letters, digits, `_` and `-`.
///
/// Every run of other characters becomes one underscore; the result is cut
/// to `max_len` characters.
///
/// ```
/// use chatarchive::conversation::slugify;
///
/// assert_eq!(slugify("Café & Friends!!", 80), "Caf_Friends_");
/// assert_eq!(slugify("  Team-Notes  ", 80), "Team-Notes");
/// assert_eq!(slugify("", 80), "chat");
/// ```
pub fn slugify(title: &str, max_len: usize) -> String {
    let slug = UNSAFE_RUN.replace_all(title.trim(), "_");
    // Only ASCII is left, so byte and char boundaries agree
    let slug = &slug[..slug.len().min(max_len)];
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Which side of a chat view a message sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Someone else
    Left,
    /// The local user
    Right,
}

impl Side {
    /// Places `author` on the right when it is one of `self_names`.
    pub fn of<S: AsRef<str>>(author: &str, self_names: &[S]) -> Self {
        if self_names.iter().any(|name| name.as_ref() == author) {
            Side::Right
        } else {
            Side::Left
        }
    }
}

/// One chat, assembled from one or more archives.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    id: String,
    title: String,
    messages: Vec<Message>,
    media_root: PathBuf,
}

impl Conversation {
    /// Creates a conversation, deriving its id from `title`.
    ///
    /// `messages` are sorted by timestamp (stable).
    pub fn new(title: impl Into<String>, messages: Vec<Message>, media_root: impl Into<PathBuf>) -> Self {
        let title = title.into();
        Self::with_id(slugify(&title, DEFAULT_SLUG_MAX_LEN), title, messages, media_root)
    }

    /// Creates a conversation with an explicit id.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        mut messages: Vec<Message>,
        media_root: impl Into<PathBuf>,
    ) -> Self {
        messages.sort_by_key(Message::timestamp);
        Self {
            id: id.into(),
            title: title.into(),
            messages,
            media_root: media_root.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Messages in timestamp order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Directory the first contributing archive was extracted to.
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.first().map(Message::timestamp)
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.messages.last().map(Message::timestamp)
    }

    /// Distinct authors in order of first appearance.
    pub fn authors(&self) -> Vec<&str> {
        let mut authors: Vec<&str> = Vec::new();
        for msg in &self.messages {
            if !authors.contains(&msg.author()) {
                authors.push(msg.author());
            }
        }
        authors
    }

    /// Author names are worth showing once more than two people talk.
    pub fn show_authors_by_default(&self) -> bool {
        self.authors().len() > 2
    }

    /// Total number of linked attachments.
    pub fn attachment_count(&self) -> usize {
        self.messages.iter().map(|m| m.attachments().len()).sum()
    }

    /// Absorbs `other`'s messages and restores timestamp order.
    ///
    /// Attachments keep whatever links they already had.
    pub fn merge(&mut self, other: Conversation) {
        self.messages.extend(other.messages);
        self.messages.sort_by_key(Message::timestamp);
    }

    /// One-line listing label, e.g. `Alice — 12 msgs — 05/03/2024 → 07/03/2024`.
    ///
    /// Returns `None` for an empty conversation.
    pub fn summary(&self) -> Option<String> {
        let first = self.first_timestamp()?;
        let last = self.last_timestamp()?;
        Some(format!(
            "{} — {} msgs — {} → {}",
            self.title,
            self.messages.len(),
            first.format("%d/%m/%Y"),
            last.format("%d/%m/%Y")
        ))
    }
}

/// Conversations keyed by id; colliding ids are merged.
#[derive(Debug, Clone, Default)]
pub struct ConversationLibrary {
    conversations: BTreeMap<String, Conversation>,
}

impl ConversationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a conversation, merging it into an existing one with the same
    /// id. Returns `true` if a merge happened.
    pub fn insert_or_merge(&mut self, conversation: Conversation) -> bool {
        match self.conversations.entry(conversation.id.clone()) {
            Entry::Occupied(mut existing) => {
                debug!(
                    id = %conversation.id,
                    added = conversation.len(),
                    "merging conversation"
                );
                existing.get_mut().merge(conversation);
                true
            }
            Entry::Vacant(slot) => {
                slot.insert(conversation);
                false
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Iterates conversations in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.values()
    }

    /// Non-empty conversations, most recently active first.
    pub fn by_recent_activity(&self) -> Vec<&Conversation> {
        let mut listed: Vec<&Conversation> = self.iter().filter(|c| !c.is_empty()).collect();
        listed.sort_by(|a, b| b.last_timestamp().cmp(&a.last_timestamp()));
        listed
    }

    /// Listing labels for [`by_recent_activity`](Self::by_recent_activity).
    pub fn summaries(&self) -> Vec<String> {
        self.by_recent_activity()
            .into_iter()
            .filter_map(Conversation::summary)
            .collect()
    }

    pub fn into_conversations(self) -> Vec<Conversation> {
        self.conversations.into_values().collect()
    }
}

impl IntoIterator for ConversationLibrary {
    type Item = Conversation;
    type IntoIter = std::collections::btree_map::IntoValues<String, Conversation>;

    fn into_iter(self) -> Self::IntoIter {
        self.conversations.into_values()
    }
}
